//! Comment handlers

use axum::{extract::State, Json};
use regret_service::{ApiResponse, CommentResponse, CommentService, CreateCommentRequest};

use crate::extractors::{AnonymousAuthor, ApiPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List a story's comments, newest first
///
/// GET /stories/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    ApiPath(story_id): ApiPath<String>,
) -> ApiResult<Json<ApiResponse<Vec<CommentResponse>>>> {
    let service = CommentService::new(state.service_context());
    let comments = service.list_comments(&story_id).await?;
    Ok(Json(ApiResponse::new(comments)))
}

/// Comment on a story
///
/// POST /stories/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    author: AnonymousAuthor,
    ApiPath(story_id): ApiPath<String>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<(AnonymousAuthor, Created<Json<CommentResponse>>)> {
    let service = CommentService::new(state.service_context());
    let comment = service
        .create_comment(&story_id, &author.id, request)
        .await?;
    Ok((author, Created(Json(comment))))
}
