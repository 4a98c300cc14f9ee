//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};
use regret_common::RateLimitConfig;

use crate::handlers::{comments, health, insights, reactions, search, stories, votes};
use crate::middleware::apply_rate_limit;
use crate::state::AppState;

/// Create the main API router
///
/// Health routes are merged in after rate limiting so probes are never throttled.
pub fn create_router(rate_limit: &RateLimitConfig) -> Router<AppState> {
    let api = apply_rate_limit(api_v1_routes(), rate_limit);
    Router::new().nest("/api/v1", health_routes().merge(api))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(story_routes())
        .merge(comment_routes())
        .merge(discovery_routes())
}

/// Story routes
fn story_routes() -> Router<AppState> {
    Router::new()
        .route("/stories", get(stories::list_stories).post(stories::submit_story))
        .route("/stories/:id", get(stories::get_story))
        .route("/stories/:id/reactions/:kind", post(reactions::react_to_story))
        .route(
            "/stories/:id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/stories/:id/sliding-doors/votes", post(votes::vote))
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new().route("/comments/:id/reactions/:kind", post(reactions::react_to_comment))
}

/// Search and statistics routes
fn discovery_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search::search))
        .route("/insights", get(insights::insights))
        .route("/categories", get(insights::category_stats))
        .route("/stats", get(stories::home_stats))
}
