//! Sliding doors vote handler

use axum::{extract::State, Json};
use regret_service::{ServiceError, SlidingDoorsService, VoteRequest, VoteResponse};

use crate::extractors::{AnonymousAuthor, ApiPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Vote on a story's alternate path
///
/// POST /stories/{id}/sliding-doors/votes
pub async fn vote(
    State(state): State<AppState>,
    author: AnonymousAuthor,
    ApiPath(story_id): ApiPath<String>,
    ValidatedJson(request): ValidatedJson<VoteRequest>,
) -> ApiResult<(AnonymousAuthor, Json<VoteResponse>)> {
    let choice = request.choice().map_err(ServiceError::Validation)?;
    let service = SlidingDoorsService::new(state.service_context());
    let response = service.vote(&story_id, &author.id, choice).await?;
    Ok((author, Json(response)))
}
