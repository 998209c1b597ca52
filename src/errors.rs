//! Unified error types for the storefront API.
//!
//! Every fallible operation in the crate returns [`Result`]. The HTTP boundary
//! maps these variants onto status codes: `Validation` becomes 400, `NotFound`
//! becomes 404, and everything else surfaces as 500.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected request input (bad field value, empty payload, etc.)
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of what failed validation
        message: String,
    },

    /// A lookup or delete touched zero rows
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. "user" or "product"
        entity: &'static str,
        /// The identifier that failed to resolve
        id: String,
    },

    /// Configuration problem (missing file, bad TOML, bad env var)
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the configuration problem
        message: String,
    },

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Any failure reported by the database driver
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (listener binding, seed file reads)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Builds a `Validation` error from anything stringly.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// Builds a `NotFound` error for the given entity kind and id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Error::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
