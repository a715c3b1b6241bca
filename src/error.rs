//! Error types for Storefront.

use thiserror::Error;

/// Common error type for Storefront.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Database error.
    ///
    /// Wraps errors from the sqlx backend; converted automatically.
    #[error("database error: {0}")]
    Database(String),

    /// A row with the same unique key already exists.
    #[error("duplicate {0}")]
    Duplicate(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for StorefrontError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StorefrontError::Duplicate(db_err.message().to_string())
            }
            _ => StorefrontError::Database(e.to_string()),
        }
    }
}

/// Result type alias for Storefront operations.
pub type Result<T> = std::result::Result<T, StorefrontError>;
