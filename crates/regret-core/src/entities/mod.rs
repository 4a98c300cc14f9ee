//! Domain entities

mod category;
mod comment;
mod story;

pub use category::Category;
pub use comment::{Comment, CommentDraft, CommentType};
pub use story::{Story, StoryDraft, EXCERPT_LEN};

/// Stored field names shared by the entity mappings and the services
pub mod field {
    pub const TITLE: &str = "title";
    pub const STORY: &str = "story";
    pub const LESSON: &str = "lesson";
    pub const CATEGORY: &str = "category";
    pub const AGE_WHEN_HAPPENED: &str = "age_when_happened";
    pub const YEARS_AGO: &str = "years_ago";
    pub const ANONYMOUS_ID: &str = "anonymous_id";
    pub const REACTIONS: &str = "reactions";
    pub const COMMENT_COUNT: &str = "comment_count";
    pub const SLIDING_DOORS: &str = "sliding_doors";
    pub const IS_FEATURED: &str = "is_featured";
    pub const REGRET_ID: &str = "regret_id";
    pub const CONTENT: &str = "content";
    pub const COMMENT_TYPE: &str = "comment_type";
}
