//! Errors returned by the library service.

use serde_json::json;
use thiserror::Error;

use crate::modules::authors::models::AuthorId;
use crate::validation::ValidationErrors;

/// Library error types with stable machine-readable codes
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("not found: {entity} {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("author {author_id} does not exist")]
    MissingAuthor { author_id: AuthorId },

    #[error("conflict: author {author_id} still has {books} book(s)")]
    AuthorHasBooks { author_id: AuthorId, books: usize },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type LibraryResult<T> = Result<T, LibraryError>;

impl LibraryError {
    /// Create a not found error
    pub fn not_found(entity: &'static str, id: impl Into<i64>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            LibraryError::Validation(_) => "validation_error",
            LibraryError::NotFound { .. } => "not_found",
            LibraryError::MissingAuthor { .. } => "missing_author",
            LibraryError::AuthorHasBooks { .. } => "conflict",
            LibraryError::Internal(_) => "internal_error",
        }
    }

    /// Structured details for reports: the field errors of a validation
    /// failure, or the offending reference for the other variants.
    pub fn details(&self) -> Vec<serde_json::Value> {
        match self {
            LibraryError::Validation(errors) => errors
                .errors()
                .iter()
                .filter_map(|error| serde_json::to_value(error).ok())
                .collect(),
            LibraryError::NotFound { entity, id } => vec![json!({"entity": entity, "id": id})],
            LibraryError::MissingAuthor { author_id } => {
                vec![json!({"field": "author_id", "value": author_id})]
            }
            LibraryError::AuthorHasBooks { author_id, books } => {
                vec![json!({"author_id": author_id, "books": books})]
            }
            LibraryError::Internal(_) => Vec::new(),
        }
    }
}
