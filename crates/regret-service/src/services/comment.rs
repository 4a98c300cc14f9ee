//! Comment service
//!
//! Handles listing and posting comments, and keeps the parent story's
//! denormalized `comment_count` in step.

use regret_core::{
    field, AnonymousId, Collection, Comment, CommentDraft, Fields, Filter, ListQuery, Sort,
    SortField, Story,
};
use serde_json::Value;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{CommentResponse, CreateCommentRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::story::StoryService;

/// Upper bound on comments returned for one story
const MAX_COMMENTS_PER_STORY: usize = 500;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comments on a story, newest first
    #[instrument(skip(self))]
    pub async fn list_comments(&self, story_id: &str) -> ServiceResult<Vec<CommentResponse>> {
        let query = ListQuery::new()
            .filter(Filter::equal(field::REGRET_ID, story_id))
            .sort(Sort::desc(SortField::CreatedAt))
            .limit(MAX_COMMENTS_PER_STORY);

        let list = self.ctx.store().list(Collection::Comments, &query).await?;

        Ok(list
            .documents
            .iter()
            .map(Comment::from_document)
            .map(CommentResponse::from)
            .collect())
    }

    /// Post a comment and bump the story's reply count
    ///
    /// The comment is kept even when the reply count cannot be updated.
    #[instrument(skip(self, request), fields(author = %author))]
    pub async fn create_comment(
        &self,
        story_id: &str,
        author: &AnonymousId,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;
        let comment_type = request.comment_type().map_err(ServiceError::Validation)?;

        // The story must exist before anything is written
        StoryService::new(self.ctx).find_story(story_id).await?;

        let draft = CommentDraft {
            regret_id: story_id.to_string(),
            content: request.content,
            comment_type,
            anonymous_id: author.to_string(),
        };

        let id = self.ctx.generate_id();
        let document = self
            .ctx
            .store()
            .create(Collection::Comments, &id, draft.into_fields())
            .await?;
        let comment = Comment::from_document(&document);

        info!(
            comment_id = %comment.id,
            story_id = %story_id,
            comment_type = %comment.comment_type,
            "Comment created"
        );

        self.increment_reply_count(story_id).await;

        Ok(comment.into())
    }

    /// Read the story, add one to `comment_count`, write that field back
    ///
    /// Not atomic: concurrent comments can lose increments. Failures are
    /// logged and reported as `false`, never retried.
    #[instrument(skip(self))]
    pub async fn increment_reply_count(&self, story_id: &str) -> bool {
        let store = self.ctx.store();

        let story = match store.get(Collection::Regrets, story_id).await {
            Ok(Some(document)) => Story::from_document(&document),
            Ok(None) => {
                warn!(story_id = %story_id, "Story disappeared before its reply count was updated");
                return false;
            }
            Err(e) => {
                warn!(story_id = %story_id, error = %e, "Failed to read story for reply count");
                return false;
            }
        };

        let next = story.comment_count.saturating_add(1);
        let mut patch = Fields::new();
        patch.insert(field::COMMENT_COUNT.into(), Value::from(next));

        match store.update(Collection::Regrets, story_id, patch).await {
            Ok(_) => true,
            Err(e) => {
                warn!(story_id = %story_id, error = %e, "Failed to update reply count");
                false
            }
        }
    }
}
