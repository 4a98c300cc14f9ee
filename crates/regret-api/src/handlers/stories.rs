//! Story handlers
//!
//! Endpoints for the story feed, single stories and submissions.

use axum::{extract::State, Json};
use regret_service::{
    FeedQuery, HomeStatsResponse, StoryFeedResponse, StoryResponse, StoryService,
    SubmitStoryRequest,
};

use crate::extractors::{AnonymousAuthor, ApiPath, ApiQuery, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List stories, newest or most discussed first
///
/// GET /stories?category&sort&page
pub async fn list_stories(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<FeedQuery>,
) -> ApiResult<Json<StoryFeedResponse>> {
    let service = StoryService::new(state.service_context());
    let feed = service.list_stories(query).await?;
    Ok(Json(feed))
}

/// Submit a story
///
/// POST /stories
pub async fn submit_story(
    State(state): State<AppState>,
    author: AnonymousAuthor,
    ValidatedJson(request): ValidatedJson<SubmitStoryRequest>,
) -> ApiResult<(AnonymousAuthor, Created<Json<StoryResponse>>)> {
    let service = StoryService::new(state.service_context());
    let story = service.submit_story(&author.id, request).await?;
    Ok((author, Created(Json(story))))
}

/// Get a single story
///
/// GET /stories/{id}
pub async fn get_story(
    State(state): State<AppState>,
    ApiPath(story_id): ApiPath<String>,
) -> ApiResult<Json<StoryResponse>> {
    let service = StoryService::new(state.service_context());
    let story = service.get_story(&story_id).await?;
    Ok(Json(story))
}

/// Home page counters
///
/// GET /stats
pub async fn home_stats(State(state): State<AppState>) -> ApiResult<Json<HomeStatsResponse>> {
    let service = StoryService::new(state.service_context());
    let stats = service.home_stats().await?;
    Ok(Json(stats))
}
