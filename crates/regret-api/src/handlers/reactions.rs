//! Reaction handlers
//!
//! Each call adds one reaction of the given kind.

use axum::{extract::State, Json};
use regret_service::{ReactionService, ReactionsResponse};

use crate::extractors::{ApiPath, ReactionPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// React to a story
///
/// POST /stories/{id}/reactions/{kind}
pub async fn react_to_story(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<ReactionPath>,
) -> ApiResult<Json<ReactionsResponse>> {
    let kind = path.kind()?;
    let service = ReactionService::new(state.service_context());
    let response = service.react_to_story(&path.id, kind).await?;
    Ok(Json(response))
}

/// React to a comment
///
/// POST /comments/{id}/reactions/{kind}
pub async fn react_to_comment(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<ReactionPath>,
) -> ApiResult<Json<ReactionsResponse>> {
    let kind = path.kind()?;
    let service = ReactionService::new(state.service_context());
    let response = service.react_to_comment(&path.id, kind).await?;
    Ok(Json(response))
}
