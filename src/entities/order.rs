//! Order entity - Represents a placed order.
//!
//! The total amount is derived from the order's items at placement time and
//! is never settable by callers. Status is a free-form string defaulting to
//! `"pending"`; no transition graph is enforced.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user who placed the order
    pub user_id: i64,
    /// Sum of quantity x unit_price over all items, computed at placement
    pub total_amount: f64,
    /// Free-form status string (e.g. "pending", "shipped")
    pub status: String,
    /// Delivery address captured at placement
    pub shipping_address: String,
    /// When the order was placed
    pub order_date: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// One order exclusively owns many order items
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
