//! Sliding doors service
//!
//! Handles votes on a story's alternate-path scenario.

use regret_core::{field, AnonymousId, Collection, DomainError, Fields, VoteChoice};
use serde_json::Value;
use tracing::{info, instrument};

use crate::dto::{SlidingDoorsResponse, VoteResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::story::StoryService;

/// Sliding doors service
pub struct SlidingDoorsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SlidingDoorsService<'a> {
    /// Create a new SlidingDoorsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Cast `voter`'s vote on a story's alternate path
    ///
    /// The ledger is consulted before anything is read, and the vote is only
    /// recorded there once the story write has succeeded. The tallies are
    /// read, incremented and written back whole, so concurrent voters can
    /// lose each other's votes.
    #[instrument(skip(self), fields(voter = %voter))]
    pub async fn vote(
        &self,
        story_id: &str,
        voter: &AnonymousId,
        choice: VoteChoice,
    ) -> ServiceResult<VoteResponse> {
        let ledger = self.ctx.ledger_for(voter);
        if ledger.has_voted(story_id).await? {
            return Err(DomainError::AlreadyVoted(story_id.to_string()).into());
        }

        let story = StoryService::new(self.ctx).find_story(story_id).await?;
        let doors = story
            .sliding_doors
            .ok_or_else(|| DomainError::SlidingDoorsNotFound(story_id.to_string()))?;

        let next = doors.with_vote(choice);
        let mut patch = Fields::new();
        patch.insert(field::SLIDING_DOORS.into(), Value::from(next.serialize()));
        self.ctx
            .store()
            .update(Collection::Regrets, story_id, patch)
            .await?;

        ledger.record(story_id).await?;

        info!(
            story_id = %story_id,
            choice = %choice,
            total_votes = next.total_votes(),
            "Sliding doors vote recorded"
        );

        Ok(VoteResponse {
            story_id: story_id.to_string(),
            choice,
            sliding_doors: SlidingDoorsResponse::from(&next),
        })
    }
}
