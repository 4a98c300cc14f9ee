//! # regret-core
//!
//! Domain layer containing entities, value objects, the lenient stored-value
//! parser, the document model and the store and vote-ledger ports.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod document;
pub mod entities;
pub mod error;
pub mod lenient;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use document::{
    Collection, Document, DocumentList, Fields, Filter, ListQuery, Sort, SortDirection, SortField,
};
pub use entities::{field, Category, Comment, CommentDraft, CommentType, Story, StoryDraft};
pub use error::DomainError;
pub use traits::{DocumentStore, RepoResult, VoteLedger, VoteLedgerProvider};
pub use value_objects::{
    AnonymousId, ReactionBundle, ReactionKind, SlidingDoors, VoteChoice, VotePercentages,
};
