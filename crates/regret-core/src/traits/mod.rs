//! Ports - the interfaces the domain needs from infrastructure
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

mod store;
mod vote_ledger;

pub use store::{DocumentStore, RepoResult};
pub use vote_ledger::{VoteLedger, VoteLedgerProvider};
