//! # regret-service
//!
//! Application layer containing the story, comment, reaction, voting and
//! statistics services, the optimistic reaction counter, and the DTOs.

pub mod counter;
pub mod dto;
pub mod services;

pub use counter::{CounterObserver, CounterTarget, ReactionCounter, TracingObserver};
pub use dto::*;
pub use services::{
    CommentService, InsightsService, MaintenanceService, ReactionService, RepairReport,
    SearchService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    SlidingDoorsService, StoryService,
};
