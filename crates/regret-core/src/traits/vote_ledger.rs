//! Vote ledger port - "has this voter already voted on this record"

use std::sync::Arc;

use async_trait::async_trait;

use super::store::RepoResult;
use crate::value_objects::AnonymousId;

/// Per-voter record of which stories have been voted on
#[async_trait]
pub trait VoteLedger: Send + Sync {
    async fn has_voted(&self, record_id: &str) -> RepoResult<bool>;

    async fn record(&self, record_id: &str) -> RepoResult<()>;
}

/// Hands out the ledger belonging to one voter
#[async_trait]
pub trait VoteLedgerProvider: Send + Sync {
    fn ledger_for(&self, voter: &AnonymousId) -> Arc<dyn VoteLedger>;

    /// Check the backing service is reachable
    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}
