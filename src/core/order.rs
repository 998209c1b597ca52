//! Order business logic - Handles order placement and retrieval.
//!
//! Order placement is the one multi-statement workflow in the system: the order
//! row and all of its item rows are written inside a single database
//! transaction, so a failure at any point rolls the whole order back and no
//! partial order is ever visible. Unit prices are taken from the caller as a
//! point-in-time price lock rather than re-read from the catalog. Stock counts
//! are not touched by placement; stock is managed through the product stock
//! update only.

use crate::{
    entities::{Order, OrderItem, order, order_item, product, user},
    errors::{Error, Result},
};
use sea_orm::{
    FromQueryResult, JoinType, QueryOrder, QuerySelect, Select, Set, TransactionTrait, prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Status given to every newly placed order.
const DEFAULT_STATUS: &str = "pending";

/// One line of an order placement request.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemInput {
    /// The ordered product
    pub product_id: i64,
    /// Number of units, must be positive
    pub quantity: i32,
    /// Price per unit at order time, must be positive
    pub unit_price: f64,
}

/// An order row denormalized with the owning user's display fields.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct OrderWithUser {
    /// Unique identifier for the order
    pub id: i64,
    /// ID of the user who placed the order
    pub user_id: i64,
    /// Sum of quantity x unit_price over all items
    pub total_amount: f64,
    /// Free-form status string
    pub status: String,
    /// Delivery address captured at placement
    pub shipping_address: String,
    /// When the order was placed
    pub order_date: DateTimeUtc,
    /// Username of the owning user, if it still exists
    pub username: Option<String>,
    /// Display name of the owning user
    pub full_name: Option<String>,
}

/// An order item row denormalized with its product's display fields.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct OrderItemWithProduct {
    /// Unique identifier for the order item
    pub id: i64,
    /// ID of the owning order
    pub order_id: i64,
    /// ID of the ordered product
    pub product_id: i64,
    /// Number of units ordered
    pub quantity: i32,
    /// Price per unit at the moment the order was placed
    pub unit_price: f64,
    /// quantity x unit_price for this line
    pub subtotal: f64,
    /// Name of the referenced product, if it still exists
    pub product_name: Option<String>,
    /// Description of the referenced product
    pub product_description: Option<String>,
}

/// An order together with all of its items, as returned by the history view.
#[derive(Debug, Clone, Serialize)]
pub struct OrderHistory {
    /// The order itself
    #[serde(flatten)]
    pub order: OrderWithUser,
    /// The order's items in insertion order
    pub items: Vec<OrderItemWithProduct>,
}

/// Base select joining the user display fields onto each order row.
fn find_with_user() -> Select<Order> {
    Order::find()
        .column_as(user::Column::Username, "username")
        .column_as(user::Column::FullName, "full_name")
        .join(JoinType::LeftJoin, order::Relation::User.def())
}

/// Places an order for a user: one order row plus one item row per input line.
///
/// Validates that the item list is non-empty (zero-total orders are rejected),
/// that every quantity and unit price is positive, and that the shipping
/// address is non-empty. The total is computed from the caller-supplied unit
/// prices. All rows are written inside one transaction; any failure rolls the
/// entire order back.
///
/// # Errors
/// Returns an error if validation fails or any statement in the transaction
/// fails (e.g. an unknown user or product reference).
pub async fn place_order(
    db: &DatabaseConnection,
    user_id: i64,
    items: &[OrderItemInput],
    shipping_address: String,
) -> Result<order::Model> {
    // Validate inputs before opening a transaction
    if items.is_empty() {
        return Err(Error::validation("Order must contain at least one item"));
    }
    if shipping_address.trim().is_empty() {
        return Err(Error::validation("Shipping address cannot be empty"));
    }
    for item in items {
        if item.quantity <= 0 {
            return Err(Error::validation(format!(
                "Item quantity must be positive: {}",
                item.quantity
            )));
        }
        if !(item.unit_price.is_finite() && item.unit_price > 0.0) {
            return Err(Error::validation(format!(
                "Item unit price must be positive: {}",
                item.unit_price
            )));
        }
    }

    let total_amount: f64 = items
        .iter()
        .map(|item| f64::from(item.quantity) * item.unit_price)
        .sum();

    // All writes share one transaction; an early return drops it, rolling back
    let txn = db.begin().await?;

    let order = order::ActiveModel {
        user_id: Set(user_id),
        total_amount: Set(total_amount),
        status: Set(DEFAULT_STATUS.to_string()),
        shipping_address: Set(shipping_address),
        order_date: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let order = order.insert(&txn).await?;

    for item in items {
        let order_item = order_item::ActiveModel {
            order_id: Set(order.id),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
            subtotal: Set(f64::from(item.quantity) * item.unit_price),
            ..Default::default()
        };
        order_item.insert(&txn).await?;
    }

    txn.commit().await?;

    info!(
        order_id = order.id,
        user_id, total_amount, "Order placed successfully"
    );
    Ok(order)
}

/// Retrieves an order by ID with the owner's display fields joined in.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Option<OrderWithUser>> {
    find_with_user()
        .filter(order::Column::Id.eq(order_id))
        .into_model::<OrderWithUser>()
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all orders, newest first, with user display fields joined in.
pub async fn get_all_orders(db: &DatabaseConnection) -> Result<Vec<OrderWithUser>> {
    find_with_user()
        .order_by_desc(order::Column::OrderDate)
        .into_model::<OrderWithUser>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves one user's orders, newest first.
pub async fn get_orders_by_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<OrderWithUser>> {
    find_with_user()
        .filter(order::Column::UserId.eq(user_id))
        .order_by_desc(order::Column::OrderDate)
        .into_model::<OrderWithUser>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the items of one order with product display fields joined in.
pub async fn get_order_items(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<OrderItemWithProduct>> {
    OrderItem::find()
        .column_as(product::Column::Name, "product_name")
        .column_as(product::Column::Description, "product_description")
        .join(JoinType::LeftJoin, order_item::Relation::Product.def())
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::Id)
        .into_model::<OrderItemWithProduct>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a user's complete order history with each order's items attached.
///
/// Fetches the orders, then the items of each order one by one. That is one
/// query per order on top of the listing, which is acceptable at this system's
/// scale.
pub async fn get_user_order_history(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<OrderHistory>> {
    let orders = get_orders_by_user(db, user_id).await?;

    let mut history = Vec::with_capacity(orders.len());
    for order in orders {
        let items = get_order_items(db, order.id).await?;
        history.push(OrderHistory { order, items });
    }
    Ok(history)
}

/// Overwrites an order's status string and returns the affected-row count.
///
/// Any non-empty string is accepted; no transition graph is enforced.
pub async fn update_order_status(
    db: &DatabaseConnection,
    order_id: i64,
    new_status: &str,
) -> Result<u64> {
    if new_status.trim().is_empty() {
        return Err(Error::validation("Order status cannot be empty"));
    }

    let mut order = <order::ActiveModel as sea_orm::ActiveModelTrait>::default();
    order.status = Set(new_status.trim().to_string());

    let result = Order::update_many()
        .set(order)
        .filter(order::Column::Id.eq(order_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes an order and the items it owns, returning the order-row count.
///
/// Items never outlive their order, so both deletes run in one transaction.
/// A count of 0 means the order was not found.
pub async fn delete_order(db: &DatabaseConnection, order_id: i64) -> Result<u64> {
    let txn = db.begin().await?;

    OrderItem::delete_many()
        .filter(order_item::Column::OrderId.eq(order_id))
        .exec(&txn)
        .await?;
    let result = Order::delete_by_id(order_id).exec(&txn).await?;

    txn.commit().await?;
    Ok(result.rows_affected)
}

/// Sums the item subtotals of an order; 0.0 for an unknown or empty order.
pub async fn get_order_total(db: &DatabaseConnection, order_id: i64) -> Result<f64> {
    #[derive(FromQueryResult)]
    struct TotalRow {
        total: Option<f64>,
    }

    let row = OrderItem::find()
        .select_only()
        .column_as(order_item::Column::Subtotal.sum(), "total")
        .filter(order_item::Column::OrderId.eq(order_id))
        .into_model::<TotalRow>()
        .one(db)
        .await?;

    Ok(row.and_then(|r| r.total).unwrap_or(0.0))
}
