//! In-process implementation of DocumentStore
//!
//! Documents are kept per collection in insertion order behind a
//! `parking_lot::RwLock`. List semantics match the PostgreSQL store: equality
//! filters, one sort key with missing values last, then offset and limit.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use regret_core::{
    Collection, Document, DocumentList, DocumentStore, Fields, ListQuery, RepoResult, Sort,
    SortField,
};

use super::error::{document_not_found, duplicate_document};

/// In-memory document store
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed document, replacing any document with the same id.
    ///
    /// Used to seed data with chosen timestamps or raw field values.
    pub fn insert(&self, collection: Collection, document: Document) {
        let mut collections = self.collections.write();
        let documents = collections.entry(collection).or_default();
        match documents.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document,
            None => documents.push(document),
        }
    }

    /// Number of documents in a collection
    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .get(&collection)
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }
}

fn sort_documents(documents: &mut [Document], sort: &Sort) {
    documents.sort_by(|a, b| {
        sort.compare(a, b).then_with(|| match sort.field {
            SortField::CreatedAt => a.id.cmp(&b.id),
            SortField::Field(_) => b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)),
        })
    });
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    #[instrument(skip(self))]
    async fn list(&self, collection: Collection, query: &ListQuery) -> RepoResult<DocumentList> {
        let mut matching: Vec<Document> = self
            .collections
            .read()
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|d| query.matches(d))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = &query.sort {
            sort_documents(&mut matching, sort);
        }

        let total = matching.len() as u64;
        let documents: Vec<Document> = matching
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect();

        debug!(total, returned = documents.len(), "Listed documents");

        Ok(DocumentList { total, documents })
    }

    #[instrument(skip(self))]
    async fn get(&self, collection: Collection, id: &str) -> RepoResult<Option<Document>> {
        Ok(self
            .collections
            .read()
            .get(&collection)
            .and_then(|documents| documents.iter().find(|d| d.id == id).cloned()))
    }

    #[instrument(skip(self, fields))]
    async fn create(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> RepoResult<Document> {
        let mut collections = self.collections.write();
        let documents = collections.entry(collection).or_default();

        if documents.iter().any(|d| d.id == id) {
            return Err(duplicate_document(collection, id));
        }

        let document = Document::new(id, fields);
        documents.push(document.clone());
        Ok(document)
    }

    #[instrument(skip(self, fields))]
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> RepoResult<Document> {
        let mut collections = self.collections.write();
        let document = collections
            .get_mut(&collection)
            .and_then(|documents| documents.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| document_not_found(collection, id))?;

        document.apply(fields);
        Ok(document.clone())
    }
}
