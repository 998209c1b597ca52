//! User business logic - Handles account registration and maintenance.
//!
//! This module provides functions for creating, retrieving, updating, and deleting
//! user accounts. Passwords are bcrypt-hashed before they reach the database and
//! the hash never leaves this layer in API responses. All functions are async and
//! return Result types for proper error handling throughout the system.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;

/// Minimum accepted password length, applied on registration and password change.
const PASSWORD_MIN_LEN: usize = 6;

/// Sparse update payload for a user.
///
/// Absent fields are left untouched. The field set is the fixed allow-list of
/// updatable columns; unknown fields are rejected at deserialization. The
/// username is deliberately not updatable.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserUpdate {
    /// New contact email
    pub email: Option<String>,
    /// New display name
    pub full_name: Option<String>,
    /// New phone number
    pub phone: Option<String>,
}

impl UserUpdate {
    /// Returns true when no field is set, i.e. the update is a no-op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.full_name.is_none() && self.phone.is_none()
    }
}

fn validate_email(email: &str) -> Result<()> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(Error::validation(format!("Invalid email address: {email}")));
    }
    Ok(())
}

fn hash_password(password: &str) -> Result<String> {
    if password.len() < PASSWORD_MIN_LEN {
        return Err(Error::validation(format!(
            "Password must be at least {PASSWORD_MIN_LEN} characters"
        )));
    }
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(Into::into)
}

/// Registers a new user, performing input validation and password hashing.
///
/// The username and email are trimmed and must be non-empty; the email must look
/// like an address; the password must meet the minimum length. Uniqueness of
/// username and email is enforced by the database constraints.
///
/// # Errors
/// Returns an error if validation fails, hashing fails, or the insert is
/// rejected (e.g. duplicate username or email).
pub async fn create_user(
    db: &DatabaseConnection,
    username: String,
    email: String,
    password: String,
    full_name: Option<String>,
    phone: Option<String>,
) -> Result<user::Model> {
    // Validate inputs
    if username.trim().is_empty() {
        return Err(Error::validation("Username cannot be empty"));
    }
    validate_email(&email)?;
    let password_hash = hash_password(&password)?;

    let user = user::ActiveModel {
        username: Set(username.trim().to_string()),
        email: Set(email.trim().to_string()),
        password: Set(password_hash),
        full_name: Set(full_name),
        phone: Set(phone),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    user.insert(db).await.map_err(Into::into)
}

/// Retrieves a specific user by its unique ID, returning None if not found.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Finds a user by username, returning None if no account matches.
pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by email, returning None if no account matches.
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all users ordered by registration time, newest first.
pub async fn get_all_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_desc(user::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies a partial update to a user and returns the affected-row count.
///
/// An empty update is a no-op: it returns 0 without issuing a statement. Set
/// fields are written with a single UPDATE; a count of 0 for a non-empty update
/// means the user does not exist.
///
/// # Errors
/// Returns an error if a provided email fails validation or the update statement
/// fails.
pub async fn update_user(
    db: &DatabaseConnection,
    user_id: i64,
    update: UserUpdate,
) -> Result<u64> {
    if update.is_empty() {
        return Ok(0);
    }

    let mut user = <user::ActiveModel as sea_orm::ActiveModelTrait>::default();
    if let Some(email) = update.email {
        validate_email(&email)?;
        user.email = Set(email.trim().to_string());
    }
    if let Some(full_name) = update.full_name {
        user.full_name = Set(Some(full_name));
    }
    if let Some(phone) = update.phone {
        user.phone = Set(Some(phone));
    }

    let result = User::update_many()
        .set(user)
        .filter(user::Column::Id.eq(user_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Replaces a user's password with the bcrypt hash of the new one.
///
/// Returns the affected-row count; 0 means the user does not exist.
pub async fn change_password(
    db: &DatabaseConnection,
    user_id: i64,
    new_password: &str,
) -> Result<u64> {
    let password_hash = hash_password(new_password)?;

    let mut user = <user::ActiveModel as sea_orm::ActiveModelTrait>::default();
    user.password = Set(password_hash);

    let result = User::update_many()
        .set(user)
        .filter(user::Column::Id.eq(user_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes a user by ID and returns the affected-row count.
///
/// A count of 0 means the user was not found; the HTTP boundary maps that to a
/// not-found response. Users referenced by existing orders cannot be deleted
/// because of the foreign-key constraint on orders.
pub async fn delete_user(db: &DatabaseConnection, user_id: i64) -> Result<u64> {
    let result = User::delete_by_id(user_id).exec(db).await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_user_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // Empty username
        let result = create_user(
            &db,
            String::new(),
            "a@b.com".to_string(),
            "secret1".to_string(),
            None,
            None,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        // Email without an @
        let result = create_user(
            &db,
            "alice".to_string(),
            "not-an-email".to_string(),
            "secret1".to_string(),
            None,
            None,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        // Password below minimum length
        let result = create_user(
            &db,
            "alice".to_string(),
            "a@b.com".to_string(),
            "short".to_string(),
            None,
            None,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let user = create_user(
            &db,
            "alice".to_string(),
            "alice@example.com".to_string(),
            "secret1".to_string(),
            Some("Alice Doe".to_string()),
            None,
        )
        .await?;

        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.full_name.as_deref(), Some("Alice Doe"));
        assert!(user.phone.is_none());

        // Created record is immediately fetchable and matches the submitted fields
        let fetched = get_user_by_id(&db, user.id).await?.unwrap();
        assert_eq!(fetched, user);

        Ok(())
    }

    #[tokio::test]
    async fn test_password_is_hashed() -> Result<()> {
        let db = setup_test_db().await?;

        let user = create_test_user(&db, "alice").await?;

        assert_ne!(user.password, "secret1");
        assert!(bcrypt::verify("secret1", &user.password).unwrap());

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected_by_database() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_user(&db, "alice").await?;
        let result = create_user(
            &db,
            "alice".to_string(),
            "other@example.com".to_string(),
            "secret1".to_string(),
            None,
            None,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Database(_)));

        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_by_username_and_email() -> Result<()> {
        let db = setup_test_db().await?;

        let user = create_test_user(&db, "alice").await?;

        let by_name = get_user_by_username(&db, "alice").await?.unwrap();
        assert_eq!(by_name.id, user.id);

        let by_email = get_user_by_email(&db, &user.email).await?.unwrap();
        assert_eq!(by_email.id, user.id);

        assert!(get_user_by_username(&db, "nobody").await?.is_none());
        assert!(get_user_by_email(&db, "nobody@example.com").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_users_newest_first() -> Result<()> {
        let db = setup_test_db().await?;

        let first = create_test_user(&db, "alice").await?;
        let second = create_test_user(&db, "bob").await?;

        let users = get_all_users(&db).await?;
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, second.id);
        assert_eq!(users[1].id, first.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_update_is_noop_without_database_access() -> Result<()> {
        // A mock with no prepared results errors on any statement, so a clean
        // Ok(0) proves the empty update never reached the database.
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let affected = update_user(&db, 1, UserUpdate::default()).await?;
        assert_eq!(affected, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_partial_update_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let user = create_test_user(&db, "alice").await?;

        let update = UserUpdate {
            full_name: Some("Alice Updated".to_string()),
            ..Default::default()
        };
        let affected = update_user(&db, user.id, update).await?;
        assert_eq!(affected, 1);

        let fetched = get_user_by_id(&db, user.id).await?.unwrap();
        assert_eq!(fetched.full_name.as_deref(), Some("Alice Updated"));
        // Untouched fields survive
        assert_eq!(fetched.username, user.username);
        assert_eq!(fetched.email, user.email);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_user_affects_zero_rows() -> Result<()> {
        let db = setup_test_db().await?;

        let update = UserUpdate {
            phone: Some("555-0100".to_string()),
            ..Default::default()
        };
        let affected = update_user(&db, 999, update).await?;
        assert_eq!(affected, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_change_password() -> Result<()> {
        let db = setup_test_db().await?;

        let user = create_test_user(&db, "alice").await?;

        let affected = change_password(&db, user.id, "newsecret").await?;
        assert_eq!(affected, 1);

        let fetched = get_user_by_id(&db, user.id).await?.unwrap();
        assert!(bcrypt::verify("newsecret", &fetched.password).unwrap());

        // Too-short replacement is rejected before touching the row
        let result = change_password(&db, user.id, "nope").await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_user() -> Result<()> {
        let db = setup_test_db().await?;

        let user = create_test_user(&db, "alice").await?;

        assert_eq!(delete_user(&db, user.id).await?, 1);
        assert!(get_user_by_id(&db, user.id).await?.is_none());

        // Deleting a nonexistent id reports zero rows, not an error
        assert_eq!(delete_user(&db, user.id).await?, 0);

        Ok(())
    }
}
