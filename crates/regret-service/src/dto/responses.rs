//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use regret_core::{
    Category, CommentType, ReactionBundle, ReactionKind, VoteChoice, VotePercentages,
};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Category key with its display metadata
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub key: Category,
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

// ============================================================================
// Story Responses
// ============================================================================

/// Story response
#[derive(Debug, Clone, Serialize)]
pub struct StoryResponse {
    pub id: String,
    pub title: String,
    pub story: String,
    /// First 200 characters of the story body
    pub excerpt: String,
    pub lesson: String,
    pub category: CategoryInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_when_happened: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_ago: Option<u32>,
    pub anonymous_id: String,
    pub reactions: ReactionBundle,
    pub total_reactions: u64,
    pub comment_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sliding_doors: Option<SlidingDoorsResponse>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of the story feed
#[derive(Debug, Clone, Serialize)]
pub struct StoryFeedResponse {
    /// "Regret of the day", only on page 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<StoryResponse>,
    pub stories: Vec<StoryResponse>,
    pub total: u64,
    pub page: u32,
    pub page_size: usize,
    pub total_pages: u64,
}

/// Search results
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub stories: Vec<StoryResponse>,
    pub total: usize,
}

/// Home page counters
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HomeStatsResponse {
    pub total_stories: u64,
    pub total_comments: u64,
    pub total_reactions: u64,
}

// ============================================================================
// Sliding Doors Responses
// ============================================================================

/// Sliding doors scenario with its tallies
#[derive(Debug, Clone, Serialize)]
pub struct SlidingDoorsResponse {
    pub alternate_path: String,
    pub votes_better: u64,
    pub votes_worse: u64,
    pub votes_same: u64,
    pub total_votes: u64,
    pub percentages: VotePercentages,
}

/// Result of a vote
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub story_id: String,
    pub choice: VoteChoice,
    pub sliding_doors: SlidingDoorsResponse,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// Comment response
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub regret_id: String,
    pub content: String,
    pub anonymous_id: String,
    pub comment_type: CommentType,
    pub comment_type_label: &'static str,
    pub comment_type_icon: &'static str,
    pub reactions: ReactionBundle,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// Bundle after a reaction was recorded
#[derive(Debug, Clone, Serialize)]
pub struct ReactionsResponse {
    pub id: String,
    pub kind: ReactionKind,
    pub reactions: ReactionBundle,
}

// ============================================================================
// Statistics Responses
// ============================================================================

/// Community insights dashboard
#[derive(Debug, Clone, Serialize)]
pub struct InsightsResponse {
    pub total_stories: u64,
    pub total_comments: u64,
    pub total_reactions: u64,
    pub category_breakdown: Vec<CategoryShare>,
    pub age_breakdown: Vec<AgeShare>,
    /// Stories created in the last 7 days
    pub recent_activity: u64,
    pub average_reactions_per_story: u64,
    /// Comments per story, rounded to one decimal
    pub comments_per_story: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_common_category: Option<CategoryInfo>,
}

/// Stories in one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryShare {
    pub category: CategoryInfo,
    pub count: u64,
    pub percentage: u32,
}

/// Stories in one age bucket
#[derive(Debug, Clone, Serialize)]
pub struct AgeShare {
    pub range: &'static str,
    pub count: u64,
    pub percentage: u32,
}

/// Category overview entry
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStatsResponse {
    pub category: CategoryInfo,
    pub description: &'static str,
    pub total: u64,
    /// Created in the last 7 days
    pub recent: u64,
    /// More than 5 comments
    pub popular: u64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub store: String,
    pub vote_ledger: String,
}

impl ReadinessResponse {
    pub fn ready(store_healthy: bool, ledger_healthy: bool) -> Self {
        let all_healthy = store_healthy && ledger_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                store: if store_healthy { "healthy" } else { "unhealthy" }.to_string(),
                vote_ledger: if ledger_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
