//! Error handling utilities for stores

use regret_core::{Collection, DomainError};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::Store(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::Store(e.to_string())
}

/// Create a "document not found" error
pub fn document_not_found(collection: Collection, id: &str) -> DomainError {
    DomainError::DocumentNotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

/// Create a "duplicate document" error
pub fn duplicate_document(collection: Collection, id: &str) -> DomainError {
    DomainError::DuplicateDocument {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}
