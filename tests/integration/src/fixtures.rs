//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Anonymous id unique to this test run
pub fn unique_anonymous_id() -> String {
    format!("anon_test{}", unique_suffix())
}

/// Submit story request
#[derive(Debug, Clone, Serialize)]
pub struct SubmitStoryRequest {
    pub title: String,
    pub story: String,
    pub lesson: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_when_happened: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_ago: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sliding_doors: Option<SlidingDoorsRequest>,
}

/// Alternate path attached to a story
#[derive(Debug, Clone, Serialize)]
pub struct SlidingDoorsRequest {
    pub alternate_path: String,
}

impl SubmitStoryRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Never called my grandfather back {suffix}"),
            story: "He left a voicemail on a Sunday and I meant to call him after work. \
                    I kept meaning to for two weeks."
                .to_string(),
            lesson: "Return the call today, not when it is convenient.".to_string(),
            category: "family".to_string(),
            age_when_happened: Some(27),
            years_ago: Some(6),
            sliding_doors: None,
        }
    }

    pub fn in_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_sliding_doors(mut self) -> Self {
        self.sliding_doors = Some(SlidingDoorsRequest {
            alternate_path: "I would have heard his stories one last time.".to_string(),
        });
        self
    }
}

/// Create comment request
#[derive(Debug, Serialize)]
pub struct CreateCommentRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_type: Option<String>,
}

impl CreateCommentRequest {
    pub fn support() -> Self {
        Self {
            content: "Thank you for sharing this, it made me call my dad.".to_string(),
            comment_type: None,
        }
    }

    pub fn of_type(comment_type: &str) -> Self {
        Self {
            comment_type: Some(comment_type.to_string()),
            ..Self::support()
        }
    }
}

/// Vote request
#[derive(Debug, Serialize)]
pub struct VoteRequest {
    pub choice: String,
}

impl VoteRequest {
    pub fn new(choice: &str) -> Self {
        Self {
            choice: choice.to_string(),
        }
    }
}

/// Category metadata
#[derive(Debug, Deserialize)]
pub struct CategoryInfo {
    pub key: String,
    pub name: String,
}

/// Story response
#[derive(Debug, Deserialize)]
pub struct StoryResponse {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub category: CategoryInfo,
    pub anonymous_id: String,
    pub reactions: BTreeMap<String, u64>,
    pub total_reactions: u64,
    pub comment_count: u64,
    pub sliding_doors: Option<SlidingDoorsResponse>,
}

/// Feed page
#[derive(Debug, Deserialize)]
pub struct StoryFeedResponse {
    pub featured: Option<StoryResponse>,
    pub stories: Vec<StoryResponse>,
    pub total: u64,
    pub page: u32,
    pub page_size: usize,
    pub total_pages: u64,
}

/// Vote shares
#[derive(Debug, Deserialize)]
pub struct VotePercentages {
    pub better: u32,
    pub worse: u32,
    pub same: u32,
}

/// Sliding doors tallies
#[derive(Debug, Deserialize)]
pub struct SlidingDoorsResponse {
    pub alternate_path: String,
    pub votes_better: u64,
    pub votes_worse: u64,
    pub votes_same: u64,
    pub total_votes: u64,
    pub percentages: VotePercentages,
}

/// Vote response
#[derive(Debug, Deserialize)]
pub struct VoteResponse {
    pub story_id: String,
    pub choice: String,
    pub sliding_doors: SlidingDoorsResponse,
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub regret_id: String,
    pub content: String,
    pub anonymous_id: String,
    pub comment_type: String,
    pub reactions: BTreeMap<String, u64>,
}

/// Reactions response
#[derive(Debug, Deserialize)]
pub struct ReactionsResponse {
    pub id: String,
    pub kind: String,
    pub reactions: BTreeMap<String, u64>,
}

/// Search response
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub stories: Vec<StoryResponse>,
    pub total: usize,
}

/// List wrapper
#[derive(Debug, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}
