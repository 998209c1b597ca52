//! Database configuration module for the storefront API.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary
//! tables based on the entity definitions. Table creation uses `SeaORM`'s
//! `Schema::create_table_from_entity` method to generate SQL from the entity models, so
//! the database schema matches the Rust struct definitions without manual DDL. Foreign
//! keys and unique constraints derive from the entity relations and column attributes.

use crate::entities::{Category, Order, OrderItem, Product, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/storefront.sqlite".to_string())
}

/// Establishes a connection to the database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set. The
/// returned `DatabaseConnection` wraps a connection pool: each operation checks a
/// connection out for its duration and releases it on every exit path, so concurrent
/// requests never interleave statements on one connection.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(&get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// Creates tables for users, categories, products, orders, and order items. Safe to run
/// against an empty database only; existing tables are not migrated.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Referenced tables first so foreign keys resolve
    let user_table = schema.create_table_from_entity(User);
    let category_table = schema.create_table_from_entity(Category);
    let product_table = schema.create_table_from_entity(Product);
    let order_table = schema.create_table_from_entity(Order);
    let order_item_table = schema.create_table_from_entity(OrderItem);

    db.execute(builder.build(&user_table)).await?;
    db.execute(builder.build(&category_table)).await?;
    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&order_table)).await?;
    db.execute(builder.build(&order_item_table)).await?;

    Ok(())
}
