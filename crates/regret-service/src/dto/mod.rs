//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    parse_category_filter, parse_sort, CreateCommentRequest, FeedQuery, FeedSort, SearchQuery,
    SlidingDoorsRequest, SubmitStoryRequest, VoteRequest,
};

// Re-export commonly used response types
pub use responses::{
    AgeShare, ApiResponse, CategoryInfo, CategoryShare, CategoryStatsResponse, CommentResponse,
    HealthChecks, HealthResponse, HomeStatsResponse, InsightsResponse, ReactionsResponse,
    ReadinessResponse, SearchResponse, SlidingDoorsResponse, StoryFeedResponse, StoryResponse,
    VoteResponse,
};
