//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! validation and orchestration of store and ledger operations.

pub mod comment;
pub mod context;
pub mod error;
pub mod insights;
pub mod maintenance;
pub mod reaction;
pub mod search;
pub mod sliding_doors;
pub mod story;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use insights::InsightsService;
pub use maintenance::{MaintenanceService, RepairReport};
pub use reaction::ReactionService;
pub use search::SearchService;
pub use sliding_doors::SlidingDoorsService;
pub use story::StoryService;
