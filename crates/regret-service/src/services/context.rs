//! Service context - dependency container for services
//!
//! Holds the document store, the vote ledgers and the feed sizing used by
//! every service.

use std::sync::Arc;

use regret_common::FeedConfig;
use regret_core::{AnonymousId, DocumentStore, VoteLedger, VoteLedgerProvider};
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; the store and ledger provider are shared.
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn DocumentStore>,
    vote_ledgers: Arc<dyn VoteLedgerProvider>,
    feed: FeedConfig,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(
        store: Arc<dyn DocumentStore>,
        vote_ledgers: Arc<dyn VoteLedgerProvider>,
        feed: FeedConfig,
    ) -> Self {
        Self {
            store,
            vote_ledgers,
            feed,
        }
    }

    // === Store ===

    /// Get the document store
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// Shared handle to the document store
    pub fn store_handle(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.store)
    }

    // === Vote ledgers ===

    /// Get the vote ledger provider
    pub fn vote_ledgers(&self) -> &dyn VoteLedgerProvider {
        self.vote_ledgers.as_ref()
    }

    /// Ledger of the stories `voter` has voted on
    pub fn ledger_for(&self, voter: &AnonymousId) -> Arc<dyn VoteLedger> {
        self.vote_ledgers.ledger_for(voter)
    }

    // === Settings ===

    pub fn feed(&self) -> &FeedConfig {
        &self.feed
    }

    /// Generate a new document id
    pub fn generate_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &"DocumentStore")
            .field("vote_ledgers", &"VoteLedgerProvider")
            .field("feed", &self.feed)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn DocumentStore>>,
    vote_ledgers: Option<Arc<dyn VoteLedgerProvider>>,
    feed: FeedConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            vote_ledgers: None,
            feed: FeedConfig::default(),
        }
    }

    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn vote_ledgers(mut self, provider: Arc<dyn VoteLedgerProvider>) -> Self {
        self.vote_ledgers = Some(provider);
        self
    }

    pub fn feed(mut self, feed: FeedConfig) -> Self {
        self.feed = feed;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        if self.feed.page_size == 0 {
            return Err(ServiceError::validation("feed page size must be positive"));
        }
        Ok(ServiceContext::new(
            self.store
                .ok_or_else(|| ServiceError::validation("store is required"))?,
            self.vote_ledgers
                .ok_or_else(|| ServiceError::validation("vote_ledgers is required"))?,
            self.feed,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
