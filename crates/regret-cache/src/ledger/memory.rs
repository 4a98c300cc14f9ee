//! In-process vote ledger.
//!
//! Votes are held per voter in a `DashMap` and are lost on restart.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use regret_core::{AnonymousId, RepoResult, VoteLedger, VoteLedgerProvider};

type VoteSets = Arc<DashMap<String, HashSet<String>>>;

/// Vote ledger for one voter
#[derive(Clone, Debug)]
pub struct MemoryVoteLedger {
    voter: String,
    votes: VoteSets,
}

#[async_trait]
impl VoteLedger for MemoryVoteLedger {
    async fn has_voted(&self, record_id: &str) -> RepoResult<bool> {
        Ok(self
            .votes
            .get(&self.voter)
            .is_some_and(|records| records.contains(record_id)))
    }

    async fn record(&self, record_id: &str) -> RepoResult<()> {
        self.votes
            .entry(self.voter.clone())
            .or_default()
            .insert(record_id.to_string());
        Ok(())
    }
}

/// Hands out in-memory ledgers sharing one vote table
#[derive(Clone, Debug, Default)]
pub struct MemoryVoteLedgerProvider {
    votes: VoteSets,
}

impl MemoryVoteLedgerProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of voters with at least one recorded vote
    #[must_use]
    pub fn voter_count(&self) -> usize {
        self.votes.len()
    }
}

#[async_trait]
impl VoteLedgerProvider for MemoryVoteLedgerProvider {
    fn ledger_for(&self, voter: &AnonymousId) -> Arc<dyn VoteLedger> {
        Arc::new(MemoryVoteLedger {
            voter: voter.to_string(),
            votes: Arc::clone(&self.votes),
        })
    }
}
