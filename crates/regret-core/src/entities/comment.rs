//! Comment entity - a reply attached to a story

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::field;
use crate::document::{Document, Fields};
use crate::value_objects::ReactionBundle;

/// Tone of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentType {
    #[default]
    Support,
    SimilarExperience,
    Advice,
}

impl CommentType {
    pub const ALL: [CommentType; 3] = [Self::Support, Self::SimilarExperience, Self::Advice];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Support => "support",
            Self::SimilarExperience => "similar_experience",
            Self::Advice => "advice",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Support => "Support",
            Self::SimilarExperience => "Similar Experience",
            Self::Advice => "Advice",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Support => "🤗",
            Self::SimilarExperience => "💭",
            Self::Advice => "💡",
        }
    }
}

impl fmt::Display for CommentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CommentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| format!("Unknown comment type: {s}"))
    }
}

/// Comment entity as read back from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Id of the parent story
    pub regret_id: String,
    pub content: String,
    pub anonymous_id: String,
    pub comment_type: CommentType,
    pub reactions: ReactionBundle,
}

impl Comment {
    pub fn from_document(doc: &Document) -> Self {
        let text = |name: &str| doc.str_field(name).unwrap_or_default().to_string();

        Self {
            id: doc.id.clone(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
            regret_id: text(field::REGRET_ID),
            content: text(field::CONTENT),
            anonymous_id: text(field::ANONYMOUS_ID),
            comment_type: doc
                .str_field(field::COMMENT_TYPE)
                .and_then(|t| t.parse().ok())
                .unwrap_or_default(),
            reactions: ReactionBundle::parse(
                doc.str_field(field::REACTIONS),
                &ReactionBundle::comment_default(),
            ),
        }
    }

    pub fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(field::REGRET_ID.into(), Value::from(self.regret_id));
        fields.insert(field::CONTENT.into(), Value::from(self.content));
        fields.insert(field::ANONYMOUS_ID.into(), Value::from(self.anonymous_id));
        fields.insert(field::COMMENT_TYPE.into(), Value::from(self.comment_type.key()));
        fields.insert(field::REACTIONS.into(), Value::from(self.reactions.serialize()));
        fields
    }
}

/// Validated input for a new comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    pub regret_id: String,
    pub content: String,
    pub comment_type: CommentType,
    pub anonymous_id: String,
}

impl CommentDraft {
    /// Initial stored fields with zeroed comment reactions
    pub fn into_fields(self) -> Fields {
        Comment {
            id: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            regret_id: self.regret_id,
            content: self.content,
            anonymous_id: self.anonymous_id,
            comment_type: self.comment_type,
            reactions: ReactionBundle::comment_default(),
        }
        .into_fields()
    }
}
