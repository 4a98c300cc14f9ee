//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use regret_core::entities::EXCERPT_LEN;
use regret_core::{Category, Comment, SlidingDoors, Story};

use super::responses::{CategoryInfo, CommentResponse, SlidingDoorsResponse, StoryResponse};

// ============================================================================
// Category Mappers
// ============================================================================

impl From<Category> for CategoryInfo {
    fn from(category: Category) -> Self {
        Self {
            key: category,
            name: category.name(),
            icon: category.icon(),
            color: category.color(),
        }
    }
}

// ============================================================================
// Story Mappers
// ============================================================================

impl From<&Story> for StoryResponse {
    fn from(story: &Story) -> Self {
        Self {
            id: story.id.clone(),
            title: story.title.clone(),
            story: story.story.clone(),
            excerpt: story.excerpt(EXCERPT_LEN),
            lesson: story.lesson.clone(),
            category: story.category.into(),
            age_when_happened: story.age_when_happened,
            years_ago: story.years_ago,
            anonymous_id: story.anonymous_id.clone(),
            reactions: story.reactions.clone(),
            total_reactions: story.total_reactions(),
            comment_count: story.comment_count,
            sliding_doors: story.sliding_doors.as_ref().map(SlidingDoorsResponse::from),
            is_featured: story.is_featured,
            created_at: story.created_at,
            updated_at: story.updated_at,
        }
    }
}

impl From<Story> for StoryResponse {
    fn from(story: Story) -> Self {
        Self::from(&story)
    }
}

impl From<&SlidingDoors> for SlidingDoorsResponse {
    fn from(doors: &SlidingDoors) -> Self {
        Self {
            alternate_path: doors.alternate_path.clone(),
            votes_better: doors.votes_better,
            votes_worse: doors.votes_worse,
            votes_same: doors.votes_same,
            total_votes: doors.total_votes(),
            percentages: doors.percentages(),
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.clone(),
            regret_id: comment.regret_id.clone(),
            content: comment.content.clone(),
            anonymous_id: comment.anonymous_id.clone(),
            comment_type: comment.comment_type,
            comment_type_label: comment.comment_type.label(),
            comment_type_icon: comment.comment_type.icon(),
            reactions: comment.reactions.clone(),
            created_at: comment.created_at,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}
