//! Story service
//!
//! Handles submitting, fetching and paging through stories.

use regret_core::{
    field, AnonymousId, Category, Collection, DomainError, Filter, ListQuery, ReactionKind, Sort,
    SortField, Story, StoryDraft,
};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    parse_category_filter, parse_sort, FeedQuery, FeedSort, HomeStatsResponse, StoryFeedResponse,
    StoryResponse, SubmitStoryRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Story list query with the feed's category filter and ordering
pub(crate) fn story_query(category: Option<Category>, sort: FeedSort) -> ListQuery {
    let mut query = ListQuery::new();
    if let Some(category) = category {
        query = query.filter(Filter::equal(field::CATEGORY, category.key()));
    }
    match sort {
        FeedSort::Recent => query.sort(Sort::desc(SortField::CreatedAt)),
        FeedSort::Popular => query.sort(Sort::desc(SortField::Field(field::COMMENT_COUNT.into()))),
    }
}

/// Story service
pub struct StoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StoryService<'a> {
    /// Create a new StoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate and store a new story
    ///
    /// The story starts with zeroed reactions, no comments, and zeroed
    /// sliding doors tallies when an alternate path was given.
    #[instrument(skip(self, request), fields(author = %author))]
    pub async fn submit_story(
        &self,
        author: &AnonymousId,
        request: SubmitStoryRequest,
    ) -> ServiceResult<StoryResponse> {
        request.validate()?;

        let draft = StoryDraft {
            title: request.title,
            story: request.story,
            lesson: request.lesson,
            category: request.category,
            age_when_happened: request.age_when_happened,
            years_ago: request.years_ago,
            alternate_path: request.sliding_doors.map(|doors| doors.alternate_path),
            anonymous_id: author.to_string(),
        };

        let id = self.ctx.generate_id();
        let document = self
            .ctx
            .store()
            .create(Collection::Regrets, &id, draft.into_fields())
            .await?;
        let story = Story::from_document(&document);

        info!(
            story_id = %story.id,
            category = %story.category,
            sliding_doors = story.sliding_doors.is_some(),
            "Story submitted"
        );

        Ok(story.into())
    }

    /// Get a story by ID
    #[instrument(skip(self))]
    pub async fn get_story(&self, story_id: &str) -> ServiceResult<StoryResponse> {
        let story = self.find_story(story_id).await?;
        Ok(story.into())
    }

    /// One page of the feed
    ///
    /// Page 1 also carries its first story as the featured story.
    #[instrument(skip(self))]
    pub async fn list_stories(&self, query: FeedQuery) -> ServiceResult<StoryFeedResponse> {
        let category =
            parse_category_filter(query.category.as_deref()).map_err(ServiceError::Validation)?;
        let sort = parse_sort(query.sort.as_deref()).map_err(ServiceError::Validation)?;
        let page = query.page.unwrap_or(1).max(1);
        let page_size = self.ctx.feed().page_size;

        let list_query = story_query(category, sort)
            .limit(page_size)
            .offset((page as usize - 1).saturating_mul(page_size));
        let list = self
            .ctx
            .store()
            .list(Collection::Regrets, &list_query)
            .await?;

        let stories: Vec<StoryResponse> = list
            .documents
            .iter()
            .map(Story::from_document)
            .map(StoryResponse::from)
            .collect();
        let featured = if page == 1 { stories.first().cloned() } else { None };

        Ok(StoryFeedResponse {
            featured,
            stories,
            total: list.total,
            page,
            page_size,
            total_pages: list.total.div_ceil(page_size as u64),
        })
    }

    /// Counters shown on the home page
    ///
    /// Comments are counted through the denormalized `comment_count` of each
    /// story, so the figure can under-report.
    #[instrument(skip(self))]
    pub async fn home_stats(&self) -> ServiceResult<HomeStatsResponse> {
        let query = ListQuery::new().limit(self.ctx.feed().stats_fetch_limit);
        let list = self.ctx.store().list(Collection::Regrets, &query).await?;
        let stories: Vec<Story> = list.documents.iter().map(Story::from_document).collect();

        Ok(HomeStatsResponse {
            total_stories: list.total,
            total_comments: stories.iter().map(|s| s.comment_count).sum(),
            total_reactions: stories
                .iter()
                .map(|s| s.reactions.total_of(&ReactionKind::STORY))
                .sum(),
        })
    }

    pub(crate) async fn find_story(&self, story_id: &str) -> ServiceResult<Story> {
        let document = self
            .ctx
            .store()
            .get(Collection::Regrets, story_id)
            .await?
            .ok_or_else(|| DomainError::StoryNotFound(story_id.to_string()))?;
        Ok(Story::from_document(&document))
    }
}
