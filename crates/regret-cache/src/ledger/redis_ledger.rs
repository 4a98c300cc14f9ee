//! Redis-backed vote ledger.
//!
//! Each voter owns the set `sliding_doors_votes:{voter}` whose members are
//! story ids. Checks run on the server, so a voter cannot vote twice by
//! clearing client state.

use std::sync::Arc;

use async_trait::async_trait;
use regret_core::{AnonymousId, DomainError, RepoResult, VoteLedger, VoteLedgerProvider};
use tracing::instrument;

use super::VOTES_KEY_PREFIX;
use crate::pool::{RedisPool, RedisPoolError};

fn ledger_error(e: RedisPoolError) -> DomainError {
    DomainError::Ledger(e.to_string())
}

/// Vote ledger for one voter
#[derive(Clone)]
pub struct RedisVoteLedger {
    pool: RedisPool,
    key: String,
}

impl RedisVoteLedger {
    /// Create a ledger for the given voter
    #[must_use]
    pub fn new(pool: RedisPool, voter: &AnonymousId) -> Self {
        Self {
            pool,
            key: Self::votes_key(voter),
        }
    }

    /// Generate Redis key for a voter's set
    fn votes_key(voter: &AnonymousId) -> String {
        format!("{VOTES_KEY_PREFIX}{voter}")
    }

    /// Number of stories this voter has voted on
    pub async fn count(&self) -> RepoResult<u64> {
        self.pool.set_len(&self.key).await.map_err(ledger_error)
    }
}

#[async_trait]
impl VoteLedger for RedisVoteLedger {
    #[instrument(skip(self), fields(key = %self.key))]
    async fn has_voted(&self, record_id: &str) -> RepoResult<bool> {
        self.pool
            .set_contains(&self.key, record_id)
            .await
            .map_err(ledger_error)
    }

    #[instrument(skip(self), fields(key = %self.key))]
    async fn record(&self, record_id: &str) -> RepoResult<()> {
        let added = self
            .pool
            .set_add(&self.key, record_id)
            .await
            .map_err(ledger_error)?;

        tracing::debug!(record_id, added, "Recorded sliding doors vote");
        Ok(())
    }
}

/// Hands out Redis ledgers sharing one pool
#[derive(Clone, Debug)]
pub struct RedisVoteLedgerProvider {
    pool: RedisPool,
}

impl RedisVoteLedgerProvider {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteLedgerProvider for RedisVoteLedgerProvider {
    fn ledger_for(&self, voter: &AnonymousId) -> Arc<dyn VoteLedger> {
        Arc::new(RedisVoteLedger::new(self.pool.clone(), voter))
    }

    async fn health_check(&self) -> RepoResult<()> {
        self.pool.health_check().await.map_err(ledger_error)
    }
}
