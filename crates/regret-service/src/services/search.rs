//! Search service
//!
//! Category and ordering are applied by the store; the text match runs over
//! the fetched stories.

use regret_core::{Collection, Story};
use tracing::{debug, instrument};

use crate::dto::{parse_category_filter, parse_sort, SearchQuery, SearchResponse, StoryResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::story::story_query;

/// Search service
pub struct SearchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SearchService<'a> {
    /// Create a new SearchService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Stories whose title, body, lesson or category contain the query,
    /// case-insensitively
    ///
    /// A blank query returns no results without touching the store. Only the
    /// first `search_fetch_limit` stories in the requested order are searched.
    #[instrument(skip(self))]
    pub async fn search(&self, query: SearchQuery) -> ServiceResult<SearchResponse> {
        let term = query.q.as_deref().map(str::trim).unwrap_or_default();
        if term.is_empty() {
            return Ok(SearchResponse {
                query: String::new(),
                stories: Vec::new(),
                total: 0,
            });
        }

        let category =
            parse_category_filter(query.category.as_deref()).map_err(ServiceError::Validation)?;
        let sort = parse_sort(query.sort.as_deref()).map_err(ServiceError::Validation)?;

        let list_query = story_query(category, sort).limit(self.ctx.feed().search_fetch_limit);
        let list = self
            .ctx
            .store()
            .list(Collection::Regrets, &list_query)
            .await?;

        let stories: Vec<StoryResponse> = list
            .documents
            .iter()
            .map(Story::from_document)
            .filter(|story| story.matches_term(term))
            .map(StoryResponse::from)
            .collect();

        debug!(
            fetched = list.documents.len(),
            matched = stories.len(),
            "Search finished"
        );

        Ok(SearchResponse {
            query: term.to_string(),
            total: stories.len(),
            stories,
        })
    }
}
