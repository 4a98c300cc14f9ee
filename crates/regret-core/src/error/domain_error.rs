//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::ReactionKind;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Story not found: {0}")]
    StoryNotFound(String),

    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    #[error("Document not found: {collection}/{id}")]
    DocumentNotFound { collection: String, id: String },

    #[error("Story has no sliding doors scenario: {0}")]
    SlidingDoorsNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Reaction '{kind}' cannot be used on a {target}")]
    WrongReactionTarget {
        kind: ReactionKind,
        target: &'static str,
    },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Already voted on story: {0}")]
    AlreadyVoted(String),

    #[error("Document already exists: {collection}/{id}")]
    DuplicateDocument { collection: String, id: String },

    #[error("Reaction '{0}' is already being recorded")]
    ReactionInFlight(ReactionKind),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store error: {0}")]
    Store(String),

    #[error("Vote ledger error: {0}")]
    Ledger(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::StoryNotFound(_) => "UNKNOWN_STORY",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::DocumentNotFound { .. } => "UNKNOWN_DOCUMENT",
            Self::SlidingDoorsNotFound(_) => "NO_SLIDING_DOORS",

            // Validation
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::WrongReactionTarget { .. } => "WRONG_REACTION_TARGET",

            // Conflict
            Self::AlreadyVoted(_) => "ALREADY_VOTED",
            Self::DuplicateDocument { .. } => "DUPLICATE_DOCUMENT",
            Self::ReactionInFlight(_) => "REACTION_IN_FLIGHT",

            // Infrastructure
            Self::Store(_) => "STORE_ERROR",
            Self::Ledger(_) => "LEDGER_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::StoryNotFound(_)
                | Self::CommentNotFound(_)
                | Self::DocumentNotFound { .. }
                | Self::SlidingDoorsNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::WrongReactionTarget { .. })
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyVoted(_) | Self::DuplicateDocument { .. } | Self::ReactionInFlight(_)
        )
    }

    /// Check if a backing service failed
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Ledger(_))
    }
}
