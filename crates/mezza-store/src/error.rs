//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (cart, calculator, validation)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sqlx::Error (SQLite)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds not-found / duplicate row errors      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller shows a user-friendly message                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use mezza_core::{CoreError, ValidationError};
use thiserror::Error;

/// Data store and service errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Row not found.
    ///
    /// ## When This Occurs
    /// - Menu item ID not on the menu
    /// - Order ID doesn't exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A row with the same primary key already exists.
    #[error("Duplicate {entity}: '{id}' already exists")]
    Duplicate { entity: String, id: String },

    /// Business rule failure from mezza-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created or opened
    /// - Pool closed or timed out
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value could not be read back into its domain type.
    #[error("Invalid {column} in database: '{value}'")]
    Corrupt { column: String, value: String },

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::Duplicate {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound          → StoreError::NotFound
/// UNIQUE constraint failed          → StoreError::Duplicate
/// PoolTimedOut / PoolClosed         → StoreError::ConnectionFailed
/// Other                             → StoreError::Database
/// ```
///
/// The SQLite store maps constraint failures itself where it knows the
/// entity and ID; this is the fallback.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                let column = db_err
                    .message()
                    .split("UNIQUE constraint failed: ")
                    .nth(1)
                    .unwrap_or("unknown")
                    .to_string();
                StoreError::duplicate(column, "unknown")
            }

            sqlx::Error::Database(db_err) => StoreError::Database(db_err.message().to_string()),

            sqlx::Error::PoolTimedOut => {
                StoreError::ConnectionFailed("Connection pool timed out".to_string())
            }

            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),

            _ => StoreError::Database(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
