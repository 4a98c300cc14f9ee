//! Story entity - a shared regret with its counters

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::category::Category;
use super::field;
use crate::document::{Document, Fields};
use crate::value_objects::{ReactionBundle, ReactionKind, SlidingDoors};

/// Length of the feed preview of a story body, in characters
pub const EXCERPT_LEN: usize = 200;

/// Story entity as read back from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub story: String,
    pub lesson: String,
    pub category: Category,
    pub age_when_happened: Option<u32>,
    pub years_ago: Option<u32>,
    pub anonymous_id: String,
    pub reactions: ReactionBundle,
    /// Denormalized number of comments; may under-report
    pub comment_count: u64,
    pub sliding_doors: Option<SlidingDoors>,
    pub is_featured: bool,
}

impl Story {
    /// Map a stored document, tolerating missing or malformed fields
    pub fn from_document(doc: &Document) -> Self {
        let text = |name: &str| doc.str_field(name).unwrap_or_default().to_string();
        let small = |name: &str| doc.count_field(name).and_then(|n| u32::try_from(n).ok());

        Self {
            id: doc.id.clone(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
            title: text(field::TITLE),
            story: text(field::STORY),
            lesson: text(field::LESSON),
            category: Category::from_key_or_other(doc.str_field(field::CATEGORY).unwrap_or("other")),
            age_when_happened: small(field::AGE_WHEN_HAPPENED),
            years_ago: small(field::YEARS_AGO),
            anonymous_id: text(field::ANONYMOUS_ID),
            reactions: ReactionBundle::parse(
                doc.str_field(field::REACTIONS),
                &ReactionBundle::story_default(),
            ),
            comment_count: doc.count_field(field::COMMENT_COUNT).unwrap_or(0),
            sliding_doors: SlidingDoors::parse(doc.str_field(field::SLIDING_DOORS)),
            is_featured: doc.bool_field(field::IS_FEATURED).unwrap_or(false),
        }
    }

    /// Stored field map with counters re-encoded as text
    pub fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(field::TITLE.into(), Value::from(self.title));
        fields.insert(field::STORY.into(), Value::from(self.story));
        fields.insert(field::LESSON.into(), Value::from(self.lesson));
        fields.insert(field::CATEGORY.into(), Value::from(self.category.key()));
        if let Some(age) = self.age_when_happened {
            fields.insert(field::AGE_WHEN_HAPPENED.into(), Value::from(age));
        }
        if let Some(years) = self.years_ago {
            fields.insert(field::YEARS_AGO.into(), Value::from(years));
        }
        fields.insert(field::ANONYMOUS_ID.into(), Value::from(self.anonymous_id));
        fields.insert(field::REACTIONS.into(), Value::from(self.reactions.serialize()));
        fields.insert(field::COMMENT_COUNT.into(), Value::from(self.comment_count));
        fields.insert(
            field::SLIDING_DOORS.into(),
            self.sliding_doors
                .map_or(Value::Null, |doors| Value::from(doors.serialize())),
        );
        fields.insert(field::IS_FEATURED.into(), Value::from(self.is_featured));
        fields
    }

    /// Sum of the story reaction counters
    pub fn total_reactions(&self) -> u64 {
        self.reactions.total_of(&ReactionKind::STORY)
    }

    /// Case-insensitive substring match over title, body, lesson and category
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [
            self.title.as_str(),
            self.story.as_str(),
            self.lesson.as_str(),
            self.category.key(),
        ]
        .iter()
        .any(|text| text.to_lowercase().contains(&term))
    }

    /// Story body cut to `max_chars` characters with a trailing ellipsis
    pub fn excerpt(&self, max_chars: usize) -> String {
        if self.story.chars().count() <= max_chars {
            return self.story.clone();
        }
        let cut: String = self.story.chars().take(max_chars).collect();
        format!("{cut}...")
    }

    /// Whether the story was created at or after `since`
    pub fn created_since(&self, since: DateTime<Utc>) -> bool {
        self.created_at >= since
    }
}

/// Validated input for a new story
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDraft {
    pub title: String,
    pub story: String,
    pub lesson: String,
    pub category: Category,
    pub age_when_happened: Option<u32>,
    pub years_ago: Option<u32>,
    pub alternate_path: Option<String>,
    pub anonymous_id: String,
}

impl StoryDraft {
    /// Initial stored fields: zeroed reactions, no comments, not featured
    pub fn into_fields(self) -> Fields {
        let story = Story {
            id: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            title: self.title,
            story: self.story,
            lesson: self.lesson,
            category: self.category,
            age_when_happened: self.age_when_happened,
            years_ago: self.years_ago,
            anonymous_id: self.anonymous_id,
            reactions: ReactionBundle::story_default(),
            comment_count: 0,
            sliding_doors: self.alternate_path.map(SlidingDoors::new),
            is_featured: false,
        };
        story.into_fields()
    }
}
