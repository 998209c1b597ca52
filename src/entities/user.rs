//! User entity - Represents a registered customer account.
//!
//! Each user has a unique username and email, a bcrypt password hash, and
//! optional contact details. Users own orders but are never deleted along
//! with them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique across all users
    #[sea_orm(unique)]
    pub username: String,
    /// Contact email, unique across all users
    #[sea_orm(unique)]
    pub email: String,
    /// Bcrypt hash of the user's password, never exposed in responses
    #[serde(skip_serializing)]
    pub password: String,
    /// Optional display name
    pub full_name: Option<String>,
    /// Optional phone number
    pub phone: Option<String>,
    /// When the account was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
