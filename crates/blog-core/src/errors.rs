//! Cross-cutting error types for the blog backend.
//!
//! Storage failures (`DatabaseError`) and the operation-level taxonomy
//! (`ServiceError`) live in `blog-db`; a unified error is deferred to the
//! binary where all crate errors converge.

use thiserror::Error;

/// Errors that can be raised by any blog crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// A required field is missing or has the wrong shape.
    #[error("{0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
