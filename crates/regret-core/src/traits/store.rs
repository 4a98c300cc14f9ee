//! Document store port

use async_trait::async_trait;

use crate::document::{Collection, Document, DocumentList, Fields, ListQuery};
use crate::error::DomainError;

/// Result type for store and ledger operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Document store reached through four primitives
///
/// Updates overwrite the named fields wholesale. There is no merge inside a
/// field and no version check, so concurrent read-modify-write cycles on the
/// same field can lose updates.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List documents matching the query. `total` ignores limit and offset.
    async fn list(&self, collection: Collection, query: &ListQuery) -> RepoResult<DocumentList>;

    /// Fetch one document by id
    async fn get(&self, collection: Collection, id: &str) -> RepoResult<Option<Document>>;

    /// Create a document with the given id
    async fn create(&self, collection: Collection, id: &str, fields: Fields)
        -> RepoResult<Document>;

    /// Overwrite the given fields of an existing document
    ///
    /// Returns `DomainError::DocumentNotFound` when the id is unknown.
    async fn update(&self, collection: Collection, id: &str, fields: Fields)
        -> RepoResult<Document>;

    /// Check the backing service is reachable
    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}
