//! Category seeding from config.toml
//!
//! This module provides functionality to load initial category definitions
//! from a TOML configuration file. The categories defined in config.toml are
//! used to seed the database on first run or when categories are missing.

use crate::core;
use crate::errors::{Error, Result};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    /// List of category definitions to seed
    #[serde(default)]
    pub categories: Vec<CategorySeed>,
}

/// Configuration for a single seeded category
#[derive(Debug, Deserialize, Clone)]
pub struct CategorySeed {
    /// Name of the category
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
}

/// Loads the seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_seed_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Seeds the configured root categories, skipping any whose name already exists.
///
/// Seeding is idempotent so that restarting the service never duplicates
/// categories.
pub async fn seed_initial_categories(db: &DatabaseConnection, config: &SeedConfig) -> Result<()> {
    for seed in &config.categories {
        let existing = core::category::get_all_categories(db)
            .await?
            .into_iter()
            .any(|category| category.name == seed.name);

        if existing {
            debug!("Category '{}' already present, skipping seed", seed.name);
            continue;
        }

        let created =
            core::category::create_category(db, seed.name.clone(), None, seed.description.clone())
                .await?;
        info!("Seeded category '{}' (id {})", created.name, created.id);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[test]
    fn test_parse_seed_config() {
        let toml_str = r#"
            [[categories]]
            name = "Electronics"
            description = "Gadgets and devices"

            [[categories]]
            name = "Books"
        "#;

        let config: SeedConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories[0].name, "Electronics");
        assert_eq!(
            config.categories[0].description.as_deref(),
            Some("Gadgets and devices")
        );
        assert!(config.categories[1].description.is_none());
    }

    #[test]
    fn test_parse_empty_seed_config() {
        let config: SeedConfig = toml::from_str("").unwrap();
        assert!(config.categories.is_empty());
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config = SeedConfig {
            categories: vec![CategorySeed {
                name: "Electronics".to_string(),
                description: None,
            }],
        };

        seed_initial_categories(&db, &config).await?;
        seed_initial_categories(&db, &config).await?;

        let categories = core::category::get_all_categories(&db).await?;
        assert_eq!(categories.len(), 1);
        Ok(())
    }
}
