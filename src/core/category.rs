//! Category business logic - Handles the product category tree.
//!
//! Provides functions for creating, retrieving, updating, and deleting
//! categories. The tree shape comes entirely from the nullable parent
//! reference; root and child listings are plain filters over it.

use crate::{
    entities::{Category, category},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;

/// Sparse update payload for a category.
///
/// Absent fields are left untouched; unknown fields are rejected at
/// deserialization. A parent can be changed but not cleared back to root.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryUpdate {
    /// New display name
    pub name: Option<String>,
    /// New parent category ID
    pub parent_id: Option<i64>,
    /// New description
    pub description: Option<String>,
}

impl CategoryUpdate {
    /// Returns true when no field is set, i.e. the update is a no-op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parent_id.is_none() && self.description.is_none()
    }
}

/// Creates a new category, optionally under a parent.
///
/// The name is trimmed and must be non-empty. A dangling parent reference is
/// rejected by the foreign-key constraint.
pub async fn create_category(
    db: &DatabaseConnection,
    name: String,
    parent_id: Option<i64>,
    description: Option<String>,
) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("Category name cannot be empty"));
    }

    let category = category::ActiveModel {
        name: Set(name.trim().to_string()),
        parent_id: Set(parent_id),
        description: Set(description),
        ..Default::default()
    };
    category.insert(db).await.map_err(Into::into)
}

/// Retrieves a specific category by its unique ID, returning None if not found.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Option<category::Model>> {
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all categories ordered alphabetically by name.
pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the root categories, i.e. exactly those without a parent.
pub async fn get_root_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .filter(category::Column::ParentId.is_null())
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the direct children of the given parent category.
pub async fn get_subcategories(
    db: &DatabaseConnection,
    parent_id: i64,
) -> Result<Vec<category::Model>> {
    Category::find()
        .filter(category::Column::ParentId.eq(parent_id))
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies a partial update to a category and returns the affected-row count.
///
/// An empty update is a no-op: it returns 0 without issuing a statement.
pub async fn update_category(
    db: &DatabaseConnection,
    category_id: i64,
    update: CategoryUpdate,
) -> Result<u64> {
    if update.is_empty() {
        return Ok(0);
    }

    let mut category = <category::ActiveModel as sea_orm::ActiveModelTrait>::default();
    if let Some(name) = update.name {
        if name.trim().is_empty() {
            return Err(Error::validation("Category name cannot be empty"));
        }
        category.name = Set(name.trim().to_string());
    }
    if let Some(parent_id) = update.parent_id {
        category.parent_id = Set(Some(parent_id));
    }
    if let Some(description) = update.description {
        category.description = Set(Some(description));
    }

    let result = Category::update_many()
        .set(category)
        .filter(category::Column::Id.eq(category_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes a category by ID and returns the affected-row count.
///
/// A count of 0 means the category was not found. Categories referenced by
/// products or child categories cannot be deleted because of the foreign-key
/// constraints.
pub async fn delete_category(db: &DatabaseConnection, category_id: i64) -> Result<u64> {
    let result = Category::delete_by_id(category_id).exec(db).await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_category_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_category(&db, "   ".to_string(), None, None).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_fetch_category() -> Result<()> {
        let db = setup_test_db().await?;

        let category = create_category(
            &db,
            "Electronics".to_string(),
            None,
            Some("Gadgets".to_string()),
        )
        .await?;

        let fetched = get_category_by_id(&db, category.id).await?.unwrap();
        assert_eq!(fetched, category);
        assert!(fetched.parent_id.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_root_and_child_listings() -> Result<()> {
        let db = setup_test_db().await?;

        let root_a = create_test_category(&db, "Electronics").await?;
        let root_b = create_test_category(&db, "Books").await?;
        let child_a =
            create_category(&db, "Phones".to_string(), Some(root_a.id), None).await?;
        let child_b =
            create_category(&db, "Laptops".to_string(), Some(root_a.id), None).await?;

        // Root listing returns exactly the parentless categories, name order
        let roots = get_root_categories(&db).await?;
        assert_eq!(
            roots.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![root_b.id, root_a.id]
        );

        // Child listing returns exactly the categories under the given parent
        let children = get_subcategories(&db, root_a.id).await?;
        assert_eq!(
            children.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![child_b.id, child_a.id]
        );
        assert!(get_subcategories(&db, root_b.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_categories_sorted_by_name() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_category(&db, "Toys").await?;
        create_test_category(&db, "Books").await?;
        create_test_category(&db, "Garden").await?;

        let names: Vec<String> = get_all_categories(&db)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Books", "Garden", "Toys"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_update_is_noop_without_database_access() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let affected = update_category(&db, 1, CategoryUpdate::default()).await?;
        assert_eq!(affected, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_reparent_category() -> Result<()> {
        let db = setup_test_db().await?;

        let old_parent = create_test_category(&db, "Electronics").await?;
        let new_parent = create_test_category(&db, "Outlet").await?;
        let child = create_category(&db, "Phones".to_string(), Some(old_parent.id), None).await?;

        let update = CategoryUpdate {
            parent_id: Some(new_parent.id),
            ..Default::default()
        };
        assert_eq!(update_category(&db, child.id, update).await?, 1);

        let fetched = get_category_by_id(&db, child.id).await?.unwrap();
        assert_eq!(fetched.parent_id, Some(new_parent.id));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category() -> Result<()> {
        let db = setup_test_db().await?;

        let category = create_test_category(&db, "Electronics").await?;
        assert_eq!(delete_category(&db, category.id).await?, 1);
        assert_eq!(delete_category(&db, category.id).await?, 0);

        Ok(())
    }
}
