//! API Integration Tests
//!
//! Each test spawns the full HTTP stack on an ephemeral port, backed by the
//! in-memory adapters, and talks to it over real HTTP.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chirp_core::UserId;
use integration_tests::{
    assert_json, assert_status, fixtures::*, TestServer, TestServerOptions,
};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

// ============================================================================
// Create Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_post() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for("user_alice").unwrap();

    let response = server
        .post_auth("/api/v1/posts", &token, &CreatePost::new("😀"))
        .await
        .unwrap();
    let post: PostBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(post.author_id, "user_alice");
    assert_eq!(post.content, "😀");
    assert!(!post.id.is_empty());
}

#[tokio::test]
async fn test_create_accepts_emoji_sequences() {
    let server = TestServer::start_with(TestServerOptions {
        post_limit: 20,
        ..TestServerOptions::default()
    })
    .await
    .unwrap();
    let token = server.token_for("user_alice").unwrap();

    for content in sample_contents() {
        let response = server
            .post_auth("/api/v1/posts", &token, &CreatePost::new(content))
            .await
            .unwrap();
        let post: PostBody = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(post.content, content);
    }
}

#[tokio::test]
async fn test_create_without_session() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/api/v1/posts", &CreatePost::new("😀"))
        .await
        .unwrap();
    let err: ErrorEnvelope = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();

    assert_eq!(err.error.code, "UNAUTHORIZED");
    assert_eq!(server.rate_limiter.calls(), 0);
    assert_eq!(server.posts.create_calls(), 0);
    assert_eq!(server.identity.lookup_calls(), 0);
}

#[tokio::test]
async fn test_create_without_session_ignores_body() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/api/v1/posts", &serde_json::json!({ "nope": 1 }))
        .await
        .unwrap();
    let err: ErrorEnvelope = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();

    assert_eq!(err.error.code, "UNAUTHORIZED");
    assert_eq!(server.rate_limiter.calls(), 0);
    assert_eq!(server.posts.create_calls(), 0);
}

#[tokio::test]
async fn test_create_with_invalid_token() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post_auth("/api/v1/posts", "not-a-token", &CreatePost::new("😀"))
        .await
        .unwrap();
    let err: ErrorEnvelope = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(err.error.code, "UNAUTHORIZED");
    assert_eq!(server.posts.create_calls(), 0);
}

#[tokio::test]
async fn test_create_rejects_text() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for("user_alice").unwrap();

    let response = server
        .post_auth("/api/v1/posts", &token, &CreatePost::new("hello 👋"))
        .await
        .unwrap();
    let err: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(err.error.code, "BAD_REQUEST");
    let details = err.error.details.unwrap();
    assert_eq!(details["content"][0], "Only emoji's are allowed.");
    assert_eq!(server.posts.create_calls(), 0);
}

#[tokio::test]
async fn test_create_rejects_bad_lengths() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for("user_alice").unwrap();

    for content in ["😀".repeat(141), "☕".repeat(281)] {
        let response = server
            .post_auth("/api/v1/posts", &token, &CreatePost::new(content))
            .await
            .unwrap();
        assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    }
    assert!(server.posts.is_empty());

    let response = server
        .post_auth("/api/v1/posts", &token, &CreatePost::new("😀".repeat(140)))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_empty_post_reports_every_rule() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for("user_alice").unwrap();

    let response = server
        .post_auth("/api/v1/posts", &token, &CreatePost::new(""))
        .await
        .unwrap();
    let err: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    let details = err.error.details.unwrap();
    assert_eq!(
        details["content"],
        serde_json::json!([
            "Only emoji's are allowed.",
            "Post must contain at least 1 character(s)"
        ])
    );
}

#[tokio::test]
async fn test_fourth_post_is_rate_limited() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for("user_alice").unwrap();

    for _ in 0..3 {
        let response = server
            .post_auth("/api/v1/posts", &token, &CreatePost::new("🔥"))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .post_auth("/api/v1/posts", &token, &CreatePost::new("🔥"))
        .await
        .unwrap();
    assert!(response.headers().contains_key("retry-after"));
    let err: ErrorEnvelope = assert_json(response, StatusCode::TOO_MANY_REQUESTS)
        .await
        .unwrap();

    assert_eq!(err.error.code, "TOO_MANY_REQUESTS");
    assert_eq!(
        err.error.message,
        "You have made too many requests. Please try again later."
    );
    assert_eq!(server.posts.len(), 3);
}

// ============================================================================
// Query Tests
// ============================================================================

#[tokio::test]
async fn test_round_trip() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for("user_alice").unwrap();

    let response = server
        .post_auth("/api/v1/posts", &token, &CreatePost::new("😀"))
        .await
        .unwrap();
    let created: PostBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get(&format!("/api/v1/posts/{}", created.id))
        .await
        .unwrap();
    let fetched: EnrichedPostBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(fetched.post.id, created.id);
    assert_eq!(fetched.post.author_id, created.author_id);
    assert_eq!(fetched.post.content, created.content);
    assert_eq!(fetched.author.username, "alice");
    assert_eq!(
        fetched.author.profile_image_url,
        "https://img.example.com/user_alice.png"
    );
}

#[tokio::test]
async fn test_get_missing_post() {
    let server = TestServer::start().await.unwrap();

    for id in ["987654321", "nope"] {
        let response = server.get(&format!("/api/v1/posts/{id}")).await.unwrap();
        let err: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
        assert_eq!(err.error.message, "Post not found");
    }
}

#[tokio::test]
async fn test_feed_is_newest_first() {
    let server = TestServer::start().await.unwrap();
    let alice = server.token_for("user_alice").unwrap();
    let bob = server.token_for("user_bob").unwrap();

    let mut created = Vec::new();
    for (token, content) in [(&alice, "🍎"), (&bob, "🍌"), (&alice, "🍒")] {
        let response = server
            .post_auth("/api/v1/posts", token, &CreatePost::new(content))
            .await
            .unwrap();
        let post: PostBody = assert_json(response, StatusCode::CREATED).await.unwrap();
        created.push(post.id);
    }

    let response = server.get("/api/v1/posts").await.unwrap();
    let feed: Vec<EnrichedPostBody> = assert_json(response, StatusCode::OK).await.unwrap();

    let ids: Vec<String> = feed.iter().map(|p| p.post.id.clone()).collect();
    created.reverse();
    assert_eq!(ids, created);
    assert_eq!(feed[1].author.username, "bob");
}

#[tokio::test]
async fn test_posts_by_user() {
    let server = TestServer::start().await.unwrap();
    let alice = server.token_for("user_alice").unwrap();
    let bob = server.token_for("user_bob").unwrap();

    server
        .post_auth("/api/v1/posts", &alice, &CreatePost::new("🐱"))
        .await
        .unwrap();
    server
        .post_auth("/api/v1/posts", &bob, &CreatePost::new("🐶"))
        .await
        .unwrap();

    let response = server.get("/api/v1/users/user_bob/posts").await.unwrap();
    let posts: Vec<EnrichedPostBody> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].post.content, "🐶");
    assert_eq!(posts[0].author.id, "user_bob");
}

#[tokio::test]
async fn test_feed_is_capped_at_one_hundred() {
    let server = TestServer::start_with(TestServerOptions {
        post_limit: 500,
        ..TestServerOptions::default()
    })
    .await
    .unwrap();
    let token = server.token_for("user_alice").unwrap();

    for _ in 0..102 {
        let response = server
            .post_auth("/api/v1/posts", &token, &CreatePost::new("🐦"))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server.get("/api/v1/posts").await.unwrap();
    let feed: Vec<EnrichedPostBody> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(feed.len(), 100);
    assert!(feed
        .windows(2)
        .all(|w| w[0].post.created_at >= w[1].post.created_at));
}

#[tokio::test]
async fn test_unknown_author_fails_feed() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for("user_ghost").unwrap();

    let response = server
        .post_auth("/api/v1/posts", &token, &CreatePost::new("👻"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    server.identity.remove(&UserId::new("user_ghost"));
    let response = server.get("/api/v1/posts").await.unwrap();
    let err: ErrorEnvelope = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();

    assert_eq!(err.error.code, "INTERNAL");
    assert_eq!(err.error.message, "Could not find author for post");
}
