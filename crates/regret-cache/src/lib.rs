//! # regret-cache
//!
//! Vote ledger layer answering "has this voter already voted on this story".
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Redis ledger**: one Redis set per voter, enforced server-side
//! - **Memory ledger**: per-voter sets held in process
//!
//! ## Example
//!
//! ```ignore
//! use regret_cache::{RedisPool, RedisPoolConfig, RedisVoteLedgerProvider};
//! use regret_core::{AnonymousId, VoteLedgerProvider};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let provider = RedisVoteLedgerProvider::new(pool);
//!
//! let ledger = provider.ledger_for(&AnonymousId::generate());
//! if !ledger.has_voted("story-id").await? {
//!     ledger.record("story-id").await?;
//! }
//! ```

pub mod ledger;
pub mod pool;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export ledger types
pub use ledger::{
    MemoryVoteLedger, MemoryVoteLedgerProvider, RedisVoteLedger, RedisVoteLedgerProvider,
    VOTES_KEY_PREFIX,
};
