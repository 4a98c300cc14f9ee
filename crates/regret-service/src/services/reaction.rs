//! Reaction service
//!
//! Records story and comment reactions through the optimistic counter.

use regret_core::{field, Collection, Document, DomainError, ReactionBundle, ReactionKind};
use tracing::instrument;

use crate::counter::{CounterTarget, ReactionCounter};
use crate::dto::ReactionsResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add one `me_too`, `hugs` or `wisdom` to a story
    #[instrument(skip(self))]
    pub async fn react_to_story(
        &self,
        story_id: &str,
        kind: ReactionKind,
    ) -> ServiceResult<ReactionsResponse> {
        if !kind.is_story_kind() {
            return Err(DomainError::WrongReactionTarget {
                kind,
                target: "story",
            }
            .into());
        }

        let document = self
            .load(Collection::Regrets, story_id)
            .await?
            .ok_or_else(|| DomainError::StoryNotFound(story_id.to_string()))?;
        let seed = stored_bundle(&document, &ReactionBundle::story_default());

        self.increment(CounterTarget::story(story_id), seed, kind)
            .await
    }

    /// Add one `helpful` or `heart` to a comment
    #[instrument(skip(self))]
    pub async fn react_to_comment(
        &self,
        comment_id: &str,
        kind: ReactionKind,
    ) -> ServiceResult<ReactionsResponse> {
        if !kind.is_comment_kind() {
            return Err(DomainError::WrongReactionTarget {
                kind,
                target: "comment",
            }
            .into());
        }

        let document = self
            .load(Collection::Comments, comment_id)
            .await?
            .ok_or_else(|| DomainError::CommentNotFound(comment_id.to_string()))?;
        let seed = stored_bundle(&document, &ReactionBundle::comment_default());

        self.increment(CounterTarget::comment(comment_id), seed, kind)
            .await
    }

    async fn load(&self, collection: Collection, id: &str) -> ServiceResult<Option<Document>> {
        Ok(self.ctx.store().get(collection, id).await?)
    }

    async fn increment(
        &self,
        target: CounterTarget,
        seed: ReactionBundle,
        kind: ReactionKind,
    ) -> ServiceResult<ReactionsResponse> {
        let counter = ReactionCounter::new(self.ctx.store_handle(), target, seed);
        let reactions = counter.increment(kind).await?;

        Ok(ReactionsResponse {
            id: counter.target().record_id.clone(),
            kind,
            reactions,
        })
    }
}

fn stored_bundle(document: &Document, default: &ReactionBundle) -> ReactionBundle {
    ReactionBundle::parse(document.str_field(field::REACTIONS), default)
}
