//! API Integration Tests
//!
//! Every test starts its own server over the in-memory store and vote ledger,
//! so no external services are needed. The final test repeats a smoke run
//! against PostgreSQL and Redis when DATABASE_URL and REDIS_URL are set.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, persistent_config,
    TestServer, ANONYMOUS_ID_HEADER,
};
use reqwest::StatusCode;
use serde_json::Value;

async fn submit(server: &TestServer, request: &SubmitStoryRequest) -> StoryResponse {
    let response = server
        .post_as("/stories", &unique_anonymous_id(), request)
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn fetch_story(server: &TestServer, id: &str) -> StoryResponse {
    let response = server.get(&format!("/stories/{id}")).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");

    assert!(response.headers().contains_key("x-request-id"));
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");

    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["store"], "healthy");
    assert_eq!(body["checks"]["vote_ledger"], "healthy");
}

// ============================================================================
// Story Tests
// ============================================================================

#[tokio::test]
async fn test_submit_story_generates_anonymous_id() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/stories", &SubmitStoryRequest::unique())
        .await
        .unwrap();
    let header = response
        .headers()
        .get(ANONYMOUS_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .expect("anonymous id header");
    let story: StoryResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(header.starts_with("anon_"));
    assert_eq!(story.anonymous_id, header);
    assert_eq!(story.category.key, "family");
    assert_eq!(story.category.name, "Family");
    assert_eq!(story.comment_count, 0);
    assert_eq!(story.total_reactions, 0);
    assert_eq!(
        story.reactions.into_iter().collect::<Vec<_>>(),
        vec![
            ("hugs".to_string(), 0),
            ("me_too".to_string(), 0),
            ("wisdom".to_string(), 0),
        ]
    );
    assert!(story.sliding_doors.is_none());
}

#[tokio::test]
async fn test_submit_story_keeps_client_id() {
    let server = TestServer::start().await.unwrap();
    let author = unique_anonymous_id();

    let response = server
        .post_as("/stories", &author, &SubmitStoryRequest::unique().with_sliding_doors())
        .await
        .unwrap();
    let story: StoryResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(story.anonymous_id, author);
    let doors = story.sliding_doors.expect("sliding doors");
    assert_eq!(doors.total_votes, 0);
    assert_eq!(doors.percentages.better, 0);

    let fetched = fetch_story(&server, &story.id).await;
    assert_eq!(fetched.title, story.title);
    assert!(!fetched.excerpt.is_empty());
}

#[tokio::test]
async fn test_submit_story_validation() {
    let server = TestServer::start().await.unwrap();

    let short_title = SubmitStoryRequest::unique().titled("Too short");
    let response = server.post("/stories", &short_title).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let bad_category = SubmitStoryRequest::unique().in_category("hobbies");
    let response = server.post("/stories", &bad_category).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_BODY");
}

#[tokio::test]
async fn test_get_missing_story() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/stories/does-not-exist").await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_STORY");
}

#[tokio::test]
async fn test_story_feed_pagination() {
    let server = TestServer::start().await.unwrap();
    for _ in 0..8 {
        submit(&server, &SubmitStoryRequest::unique()).await;
    }

    let response = server.get("/stories").await.unwrap();
    let first: StoryFeedResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first.total, 8);
    assert_eq!(first.page, 1);
    assert_eq!(first.page_size, 6);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.stories.len(), 6);
    assert_eq!(
        first.featured.map(|s| s.id),
        Some(first.stories[0].id.clone())
    );

    let response = server.get("/stories?page=2").await.unwrap();
    let second: StoryFeedResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(second.stories.len(), 2);
    assert!(second.featured.is_none());
}

#[tokio::test]
async fn test_story_feed_filters() {
    let server = TestServer::start().await.unwrap();
    submit(&server, &SubmitStoryRequest::unique().in_category("money")).await;
    submit(&server, &SubmitStoryRequest::unique()).await;
    submit(&server, &SubmitStoryRequest::unique().in_category("money")).await;

    let response = server.get("/stories?category=money").await.unwrap();
    let feed: StoryFeedResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(feed.total, 2);
    assert!(feed.stories.iter().all(|s| s.category.key == "money"));

    let response = server.get("/stories?category=all&sort=popular").await.unwrap();
    let feed: StoryFeedResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(feed.total, 3);

    let response = server.get("/stories?sort=oldest").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let response = server.get("/stories?page=first").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_story_reactions() {
    let server = TestServer::start().await.unwrap();
    let story = submit(&server, &SubmitStoryRequest::unique()).await;
    let path = format!("/stories/{}/reactions/hugs", story.id);

    server.post_empty(&path).await.unwrap();
    let response = server.post_empty(&path).await.unwrap();
    let reactions: ReactionsResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(reactions.id, story.id);
    assert_eq!(reactions.kind, "hugs");
    assert_eq!(reactions.reactions["hugs"], 2);
    assert_eq!(reactions.reactions["me_too"], 0);

    let fetched = fetch_story(&server, &story.id).await;
    assert_eq!(fetched.total_reactions, 2);
}

#[tokio::test]
async fn test_reaction_errors() {
    let server = TestServer::start().await.unwrap();
    let story = submit(&server, &SubmitStoryRequest::unique()).await;

    let response = server
        .post_empty(&format!("/stories/{}/reactions/heart", story.id))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "WRONG_REACTION_TARGET");

    let response = server
        .post_empty(&format!("/stories/{}/reactions/likes", story.id))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");

    let response = server
        .post_empty("/stories/missing/reactions/wisdom")
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_STORY");
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comments() {
    let server = TestServer::start().await.unwrap();
    let story = submit(&server, &SubmitStoryRequest::unique()).await;
    let path = format!("/stories/{}/comments", story.id);
    let author = unique_anonymous_id();

    let response = server
        .post_as(&path, &author, &CreateCommentRequest::of_type("advice"))
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment.regret_id, story.id);
    assert_eq!(comment.anonymous_id, author);
    assert_eq!(comment.comment_type, "advice");
    assert_eq!(comment.reactions["helpful"], 0);

    server
        .post_as(&path, &author, &CreateCommentRequest::support())
        .await
        .unwrap();

    let response = server.get(&path).await.unwrap();
    let comments: DataResponse<Vec<CommentResponse>> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments.data.len(), 2);
    assert!(comments.data.iter().any(|c| c.id == comment.id));

    let fetched = fetch_story(&server, &story.id).await;
    assert_eq!(fetched.comment_count, 2);

    let response = server
        .post_empty(&format!("/comments/{}/reactions/heart", comment.id))
        .await
        .unwrap();
    let reactions: ReactionsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(reactions.reactions["heart"], 1);
}

#[tokio::test]
async fn test_comment_errors() {
    let server = TestServer::start().await.unwrap();
    let story = submit(&server, &SubmitStoryRequest::unique()).await;
    let path = format!("/stories/{}/comments", story.id);

    let response = server
        .post(&path, &CreateCommentRequest::of_type("rant"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let response = server
        .post("/stories/missing/comments", &CreateCommentRequest::support())
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_STORY");

    let fetched = fetch_story(&server, &story.id).await;
    assert_eq!(fetched.comment_count, 0);
}

// ============================================================================
// Sliding Doors Tests
// ============================================================================

#[tokio::test]
async fn test_sliding_doors_voting() {
    let server = TestServer::start().await.unwrap();
    let story = submit(&server, &SubmitStoryRequest::unique().with_sliding_doors()).await;
    let path = format!("/stories/{}/sliding-doors/votes", story.id);
    let voter = unique_anonymous_id();

    let response = server
        .post_as(&path, &voter, &VoteRequest::new("better"))
        .await
        .unwrap();
    let vote: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(vote.story_id, story.id);
    assert_eq!(vote.choice, "better");
    assert_eq!(vote.sliding_doors.votes_better, 1);
    assert_eq!(vote.sliding_doors.percentages.better, 100);

    let response = server
        .post_as(&path, &voter, &VoteRequest::new("worse"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_VOTED");

    let response = server
        .post_as(&path, &unique_anonymous_id(), &VoteRequest::new("worse"))
        .await
        .unwrap();
    let vote: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(vote.sliding_doors.total_votes, 2);
    assert_eq!(vote.sliding_doors.votes_worse, 1);
    assert_eq!(vote.sliding_doors.percentages.better, 50);
    assert_eq!(vote.sliding_doors.percentages.same, 0);

    let fetched = fetch_story(&server, &story.id).await;
    assert_eq!(fetched.sliding_doors.map(|d| d.total_votes), Some(2));
}

#[tokio::test]
async fn test_sliding_doors_errors() {
    let server = TestServer::start().await.unwrap();
    let plain = submit(&server, &SubmitStoryRequest::unique()).await;

    let response = server
        .post_as(
            &format!("/stories/{}/sliding-doors/votes", plain.id),
            &unique_anonymous_id(),
            &VoteRequest::new("same"),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "NO_SLIDING_DOORS");

    let with_doors = submit(&server, &SubmitStoryRequest::unique().with_sliding_doors()).await;
    let response = server
        .post_as(
            &format!("/stories/{}/sliding-doors/votes", with_doors.id),
            &unique_anonymous_id(),
            &VoteRequest::new("maybe"),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

// ============================================================================
// Search and Statistics Tests
// ============================================================================

#[tokio::test]
async fn test_search() {
    let server = TestServer::start().await.unwrap();
    submit(
        &server,
        &SubmitStoryRequest::unique().titled("Skipped the Lisbon semester abroad"),
    )
    .await;
    submit(&server, &SubmitStoryRequest::unique()).await;

    let response = server.get("/search?q=lisbon").await.unwrap();
    let results: SearchResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(results.query, "lisbon");
    assert_eq!(results.total, 1);
    assert!(results.stories[0].title.contains("Lisbon"));

    let response = server.get("/search?q=%20%20").await.unwrap();
    let results: SearchResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(results.total, 0);
}

#[tokio::test]
async fn test_statistics() {
    let server = TestServer::start().await.unwrap();
    let story = submit(&server, &SubmitStoryRequest::unique()).await;
    submit(&server, &SubmitStoryRequest::unique().in_category("career")).await;
    server
        .post_empty(&format!("/stories/{}/reactions/me_too", story.id))
        .await
        .unwrap();
    server
        .post(
            &format!("/stories/{}/comments", story.id),
            &CreateCommentRequest::support(),
        )
        .await
        .unwrap();

    let response = server.get("/stats").await.unwrap();
    let stats: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats["total_stories"], 2);
    assert_eq!(stats["total_comments"], 1);
    assert_eq!(stats["total_reactions"], 1);

    let response = server.get("/insights").await.unwrap();
    let insights: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(insights["total_stories"], 2);
    assert_eq!(insights["recent_activity"], 2);
    assert_eq!(insights["category_breakdown"].as_array().map(Vec::len), Some(2));
    assert_eq!(insights["age_breakdown"][0]["range"], "20-29");
    assert_eq!(insights["age_breakdown"][0]["percentage"], 100);

    let response = server.get("/categories").await.unwrap();
    let categories: DataResponse<Vec<Value>> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(categories.data.len(), 7);
    let family = categories
        .data
        .iter()
        .find(|c| c["category"]["key"] == "family")
        .expect("family category");
    assert_eq!(family["total"], 1);
    assert_eq!(family["recent"], 1);
    assert_eq!(family["popular"], 0);
}

// ============================================================================
// Persistent Backends
// ============================================================================

#[tokio::test]
async fn test_persistent_backends_smoke() {
    if !check_test_env() {
        return;
    }

    let config = persistent_config().expect("persistent config");
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let story = submit(&server, &SubmitStoryRequest::unique().with_sliding_doors()).await;
    let voter = unique_anonymous_id();
    let path = format!("/stories/{}/sliding-doors/votes", story.id);

    let response = server
        .post_as(&path, &voter, &VoteRequest::new("same"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_as(&path, &voter, &VoteRequest::new("same"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}
