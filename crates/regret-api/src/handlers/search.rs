//! Search handler

use axum::{extract::State, Json};
use regret_service::{SearchQuery, SearchResponse, SearchService};

use crate::extractors::ApiQuery;
use crate::response::ApiResult;
use crate::state::AppState;

/// Full-text search over recent stories
///
/// GET /search?q&category&sort
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> ApiResult<Json<SearchResponse>> {
    let service = SearchService::new(state.service_context());
    let results = service.search(query).await?;
    Ok(Json(results))
}
