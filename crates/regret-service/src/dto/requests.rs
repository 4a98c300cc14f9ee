//! Request DTOs for API endpoints
//!
//! Body DTOs implement `Deserialize` and `Validate`; query DTOs carry the raw
//! strings and are interpreted by the services.

use std::str::FromStr;

use regret_core::{Category, CommentType, VoteChoice};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Story Requests
// ============================================================================

/// Submit story request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitStoryRequest {
    #[validate(length(min = 10, max = 100, message = "Title must be 10-100 characters"))]
    pub title: String,

    #[validate(length(min = 50, max = 2000, message = "Story must be 50-2000 characters"))]
    pub story: String,

    #[validate(length(min = 20, max = 500, message = "Lesson must be 20-500 characters"))]
    pub lesson: String,

    pub category: Category,

    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age_when_happened: Option<u32>,

    #[validate(range(max = 100, message = "Years ago must be between 0 and 100"))]
    pub years_ago: Option<u32>,

    /// Optional alternate-path scenario
    #[validate(nested)]
    pub sliding_doors: Option<SlidingDoorsRequest>,
}

/// Alternate path attached to a new story
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SlidingDoorsRequest {
    #[validate(length(min = 20, max = 500, message = "Alternate path must be 20-500 characters"))]
    pub alternate_path: String,
}

/// Feed query (`GET /stories`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedQuery {
    /// Category key, or `all`
    pub category: Option<String>,
    /// `recent` or `popular`
    pub sort: Option<String>,
    /// 1-based page number
    pub page: Option<u32>,
}

/// Search query (`GET /search`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

/// Feed ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedSort {
    /// Newest first
    #[default]
    Recent,
    /// Most commented first
    Popular,
}

impl FromStr for FeedSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recent" => Ok(Self::Recent),
            "popular" => Ok(Self::Popular),
            other => Err(format!("Unknown sort order: {other}")),
        }
    }
}

/// Parse an optional sort parameter; absent or blank means `recent`
pub fn parse_sort(raw: Option<&str>) -> Result<FeedSort, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(FeedSort::Recent),
        Some(value) => value.parse(),
    }
}

/// Parse an optional category filter; absent, blank or `all` means no filter
pub fn parse_category_filter(raw: Option<&str>) -> Result<Option<Category>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 10, max = 500, message = "Comment must be 10-500 characters"))]
    pub content: String,

    /// Defaults to `support`
    #[serde(default)]
    pub comment_type: Option<String>,
}

impl CreateCommentRequest {
    /// Requested comment type; absent means `support`
    pub fn comment_type(&self) -> Result<CommentType, String> {
        match self.comment_type.as_deref().map(str::trim) {
            None | Some("") => Ok(CommentType::default()),
            Some(value) => CommentType::from_str(value),
        }
    }
}

// ============================================================================
// Vote Requests
// ============================================================================

/// Sliding doors vote request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VoteRequest {
    #[validate(length(min = 1, message = "Choice is required"))]
    pub choice: String,
}

impl VoteRequest {
    pub fn choice(&self) -> Result<VoteChoice, String> {
        self.choice.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn story_request() -> SubmitStoryRequest {
        serde_json::from_value(json!({
            "title": "Quit the band too early",
            "story": "We had a gig offer in another city and I said no because I was scared of leaving home.",
            "lesson": "Fear is a poor career advisor.",
            "category": "career",
            "age_when_happened": 19,
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_story_request() {
        let request = story_request();
        assert!(request.validate().is_ok());
        assert_eq!(request.category, Category::Career);
        assert!(request.sliding_doors.is_none());
    }

    #[test]
    fn test_story_lengths_are_checked() {
        let mut request = story_request();
        request.title = "Too short".into();
        assert!(request.validate().is_err());

        let mut request = story_request();
        request.lesson = "x".repeat(501);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_story_ranges_are_checked() {
        let mut request = story_request();
        request.age_when_happened = Some(0);
        assert!(request.validate().is_err());

        let mut request = story_request();
        request.age_when_happened = None;
        request.years_ago = Some(101);
        assert!(request.validate().is_err());

        let mut request = story_request();
        request.years_ago = Some(0);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_nested_alternate_path_is_checked() {
        let mut request = story_request();
        request.sliding_doors = Some(SlidingDoorsRequest {
            alternate_path: "too short".into(),
        });
        assert!(request.validate().is_err());

        request.sliding_doors = Some(SlidingDoorsRequest {
            alternate_path: "I would have toured Europe with them.".into(),
        });
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let result: Result<SubmitStoryRequest, _> = serde_json::from_value(json!({
            "title": "Quit the band too early",
            "story": "x",
            "lesson": "y",
            "category": "hobbies",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort(None), Ok(FeedSort::Recent));
        assert_eq!(parse_sort(Some(" ")), Ok(FeedSort::Recent));
        assert_eq!(parse_sort(Some("Popular")), Ok(FeedSort::Popular));
        assert!(parse_sort(Some("oldest")).is_err());
    }

    #[test]
    fn test_parse_category_filter() {
        assert_eq!(parse_category_filter(None), Ok(None));
        assert_eq!(parse_category_filter(Some("all")), Ok(None));
        assert_eq!(parse_category_filter(Some("money")), Ok(Some(Category::Money)));
        assert!(parse_category_filter(Some("hobbies")).is_err());
    }

    #[test]
    fn test_comment_type_defaults_to_support() {
        let request = CreateCommentRequest {
            content: "Same thing happened to me.".into(),
            comment_type: None,
        };
        assert_eq!(request.comment_type(), Ok(CommentType::Support));

        let request = CreateCommentRequest {
            content: "Same thing happened to me.".into(),
            comment_type: Some("advice".into()),
        };
        assert_eq!(request.comment_type(), Ok(CommentType::Advice));

        let request = CreateCommentRequest {
            content: "Same thing happened to me.".into(),
            comment_type: Some("rant".into()),
        };
        assert!(request.comment_type().is_err());
    }

    #[test]
    fn test_vote_choice() {
        let request = VoteRequest {
            choice: "Better".into(),
        };
        assert_eq!(request.choice(), Ok(VoteChoice::Better));
    }
}
