//! Shared test utilities for the storefront API.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{category, product, user},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test user with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `username` - Login name; the email is derived from it
///
/// # Defaults
/// * `email`: `"<username>@example.com"`
/// * `password`: `"secret1"` (hashed on the way in)
/// * `full_name`, `phone`: None
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::user::Model> {
    user::create_user(
        db,
        username.to_string(),
        format!("{username}@example.com"),
        "secret1".to_string(),
        None,
        None,
    )
    .await
}

/// Creates a test root category with no description.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    category::create_category(db, name.to_string(), None, None).await
}

/// Creates a test product with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `name` - Product name
/// * `category_id` - Owning category ID
///
/// # Defaults
/// * `price`: 10.0
/// * `description`: None
/// * `stock_quantity`: 10
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    category_id: i64,
) -> Result<entities::product::Model> {
    product::create_product(db, name.to_string(), 10.0, category_id, None, 10).await
}

/// Sets up a complete test environment with one root category.
/// Returns (db, category) for category- and product-related tests.
pub async fn setup_with_category() -> Result<(DatabaseConnection, entities::category::Model)> {
    let db = setup_test_db().await?;
    let category = create_test_category(&db, "Electronics").await?;
    Ok((db, category))
}

/// Sets up a complete test environment with a category and one product.
/// Returns (db, category, product).
pub async fn setup_with_product() -> Result<(
    DatabaseConnection,
    entities::category::Model,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let category = create_test_category(&db, "Electronics").await?;
    let product = create_test_product(&db, "Test Product", category.id).await?;
    Ok((db, category, product))
}

/// Sets up the environment order tests need: a user plus a small catalog.
/// Returns (db, user, products) with two products, "Phone" and "Case".
pub async fn setup_with_catalog() -> Result<(
    DatabaseConnection,
    entities::user::Model,
    Vec<entities::product::Model>,
)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "alice").await?;
    let category = create_test_category(&db, "Electronics").await?;
    let phone = create_test_product(&db, "Phone", category.id).await?;
    let case = create_test_product(&db, "Case", category.id).await?;
    Ok((db, user, vec![phone, case]))
}
