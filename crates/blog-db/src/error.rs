//! Error types for blog-db.
//!
//! `DatabaseError` is the storage layer. `ServiceError` is what operations
//! return: validation and not-found failures are detected before or instead
//! of a storage call, everything else is `Storage`.

use blog_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors from blog operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed input. The message is user-facing.
    #[error("{0}")]
    Validation(String),

    /// The referenced document does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The persistence layer failed.
    #[error("storage failure: {0}")]
    Storage(#[from] DatabaseError),
}

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl From<libsql::Error> for ServiceError {
    fn from(error: libsql::Error) -> Self {
        Self::Storage(DatabaseError::LibSql(error))
    }
}

impl From<CoreError> for ServiceError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::Validation(message),
            CoreError::NotFound { entity_type, id } => Self::Storage(DatabaseError::InvalidState(
                format!("{entity_type} {id} vanished"),
            )),
            CoreError::Other(error) => Self::Storage(DatabaseError::Other(error)),
        }
    }
}
