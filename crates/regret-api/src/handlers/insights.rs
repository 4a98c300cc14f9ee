//! Statistics handlers

use axum::{extract::State, Json};
use regret_service::{ApiResponse, CategoryStatsResponse, InsightsResponse, InsightsService};

use crate::response::ApiResult;
use crate::state::AppState;

/// Community insights
///
/// GET /insights
pub async fn insights(State(state): State<AppState>) -> ApiResult<Json<InsightsResponse>> {
    let service = InsightsService::new(state.service_context());
    Ok(Json(service.insights().await?))
}

/// Per-category statistics
///
/// GET /categories
pub async fn category_stats(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<CategoryStatsResponse>>>> {
    let service = InsightsService::new(state.service_context());
    let stats = service.category_stats().await?;
    Ok(Json(ApiResponse::new(stats)))
}
