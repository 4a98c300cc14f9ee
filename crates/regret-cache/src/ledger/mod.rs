//! `VoteLedger` implementations.
//!
//! A ledger is scoped to one anonymous voter and records the ids of the
//! stories that voter has voted on.

mod memory;
mod redis_ledger;

pub use memory::{MemoryVoteLedger, MemoryVoteLedgerProvider};
pub use redis_ledger::{RedisVoteLedger, RedisVoteLedgerProvider};

/// Key prefix of the per-voter Redis set
pub const VOTES_KEY_PREFIX: &str = "sliding_doors_votes:";
