//! Product business logic - Handles catalog operations.
//!
//! This module provides functions for creating, retrieving, searching, updating,
//! and deleting products. Read paths left-join the owning category so the
//! category name travels with the product without a second round trip. All
//! functions are async and return Result types for proper error handling.

use crate::{
    entities::{Product, category, product},
    errors::{Error, Result},
};
use sea_orm::{
    Condition, FromQueryResult, JoinType, QueryOrder, QuerySelect, Select, Set, prelude::*,
};
use serde::{Deserialize, Serialize};

/// A product row denormalized with its category's display name.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct ProductWithCategory {
    /// Unique identifier for the product
    pub id: i64,
    /// Display name of the product
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Unit price in dollars
    pub price: f64,
    /// Units currently in stock
    pub stock_quantity: i32,
    /// ID of the category this product belongs to
    pub category_id: i64,
    /// When the product was added to the catalog
    pub created_at: DateTimeUtc,
    /// Name of the owning category, if it still exists
    pub category_name: Option<String>,
}

/// Sparse update payload for a product.
///
/// Absent fields are left untouched; unknown fields are rejected at
/// deserialization.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductUpdate {
    /// New display name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New unit price, must be positive
    pub price: Option<f64>,
    /// New stock count, must be non-negative
    pub stock_quantity: Option<i32>,
    /// New owning category
    pub category_id: Option<i64>,
}

impl ProductUpdate {
    /// Returns true when no field is set, i.e. the update is a no-op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock_quantity.is_none()
            && self.category_id.is_none()
    }
}

fn validate_price(price: f64) -> Result<()> {
    if !(price.is_finite() && price > 0.0) {
        return Err(Error::validation(format!(
            "Product price must be positive: {price}"
        )));
    }
    Ok(())
}

fn validate_stock(stock_quantity: i32) -> Result<()> {
    if stock_quantity < 0 {
        return Err(Error::validation(format!(
            "Stock quantity cannot be negative: {stock_quantity}"
        )));
    }
    Ok(())
}

/// Base select joining the category name onto each product row.
fn find_with_category() -> Select<Product> {
    Product::find()
        .column_as(category::Column::Name, "category_name")
        .join(JoinType::LeftJoin, product::Relation::Category.def())
}

/// Creates a new product, performing input validation.
///
/// The name is trimmed and must be non-empty, the price must be positive and
/// finite, and the stock count non-negative. A dangling category reference is
/// rejected by the foreign-key constraint.
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    price: f64,
    category_id: i64,
    description: Option<String>,
    stock_quantity: i32,
) -> Result<product::Model> {
    // Validate inputs
    if name.trim().is_empty() {
        return Err(Error::validation("Product name cannot be empty"));
    }
    validate_price(price)?;
    validate_stock(stock_quantity)?;

    let product = product::ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description),
        price: Set(price),
        stock_quantity: Set(stock_quantity),
        category_id: Set(category_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Retrieves a product by ID with its category name joined in.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<ProductWithCategory>> {
    find_with_category()
        .filter(product::Column::Id.eq(product_id))
        .into_model::<ProductWithCategory>()
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all products, newest first, with category names joined in.
pub async fn get_all_products(db: &DatabaseConnection) -> Result<Vec<ProductWithCategory>> {
    find_with_category()
        .order_by_desc(product::Column::CreatedAt)
        .into_model::<ProductWithCategory>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the products of one category, ordered alphabetically by name.
pub async fn get_products_by_category(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Vec<ProductWithCategory>> {
    find_with_category()
        .filter(product::Column::CategoryId.eq(category_id))
        .order_by_asc(product::Column::Name)
        .into_model::<ProductWithCategory>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Searches products whose name or description contains the keyword.
///
/// Matching is an ASCII case-insensitive substring match (SQL `LIKE`), ordered
/// alphabetically by product name.
pub async fn search_products(
    db: &DatabaseConnection,
    keyword: &str,
) -> Result<Vec<ProductWithCategory>> {
    find_with_category()
        .filter(
            Condition::any()
                .add(product::Column::Name.contains(keyword))
                .add(product::Column::Description.contains(keyword)),
        )
        .order_by_asc(product::Column::Name)
        .into_model::<ProductWithCategory>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies a partial update to a product and returns the affected-row count.
///
/// An empty update is a no-op: it returns 0 without issuing a statement.
/// Provided price and stock values are validated against the same bounds as
/// creation.
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    update: ProductUpdate,
) -> Result<u64> {
    if update.is_empty() {
        return Ok(0);
    }

    let mut product = <product::ActiveModel as sea_orm::ActiveModelTrait>::default();
    if let Some(name) = update.name {
        if name.trim().is_empty() {
            return Err(Error::validation("Product name cannot be empty"));
        }
        product.name = Set(name.trim().to_string());
    }
    if let Some(description) = update.description {
        product.description = Set(Some(description));
    }
    if let Some(price) = update.price {
        validate_price(price)?;
        product.price = Set(price);
    }
    if let Some(stock_quantity) = update.stock_quantity {
        validate_stock(stock_quantity)?;
        product.stock_quantity = Set(stock_quantity);
    }
    if let Some(category_id) = update.category_id {
        product.category_id = Set(category_id);
    }

    let result = Product::update_many()
        .set(product)
        .filter(product::Column::Id.eq(product_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Replaces a product's stock count and returns the affected-row count.
pub async fn update_stock(
    db: &DatabaseConnection,
    product_id: i64,
    new_quantity: i32,
) -> Result<u64> {
    validate_stock(new_quantity)?;

    let mut product = <product::ActiveModel as sea_orm::ActiveModelTrait>::default();
    product.stock_quantity = Set(new_quantity);

    let result = Product::update_many()
        .set(product)
        .filter(product::Column::Id.eq(product_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes a product by ID and returns the affected-row count.
///
/// A count of 0 means the product was not found. Products referenced by order
/// items cannot be deleted because of the foreign-key constraint.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<u64> {
    let result = Product::delete_by_id(product_id).exec(db).await?;
    Ok(result.rows_affected)
}
