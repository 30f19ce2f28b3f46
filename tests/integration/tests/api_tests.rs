//! API Integration Tests
//!
//! These tests require a running PostgreSQL instance reachable through
//! `DATABASE_URL`; they are skipped when it is not set.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use futures::future::join_all;
use reqwest::StatusCode;

async fn create_post(server: &TestServer, user: &str, request: &CreatePostRequest) -> PostBody {
    let response = server.post_as("/api/posts", user, request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn vote(server: &TestServer, user: &str, post_id: &str, direction: &str) -> (StatusCode, VoteBody) {
    let response = server
        .post_empty_as(&format!("/api/posts/{post_id}/{direction}"), user)
        .await
        .unwrap();
    let status = response.status();
    let body = response.json().await.unwrap();
    (status, body)
}

async fn feed(server: &TestServer, query: &str) -> FeedBody {
    let response = server.get(&format!("/api/posts?{query}")).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
    assert!(body["checks"].get("redis").is_none());
}

// ============================================================================
// Post Creation Tests
// ============================================================================

#[tokio::test]
async fn test_create_post_defaults() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = unique_user();

    let post = create_post(&server, &user, &CreatePostRequest::new("hello", &["x", "y"])).await;

    assert_eq!(post.content, "hello");
    assert_eq!(post.tags, vec!["x", "y"]);
    assert_eq!(post.post_type, "STANDARD");
    assert_eq!((post.up_votes, post.down_votes), (0, 0));
    assert!(post.user_vote.is_none());
    assert_eq!(post.expires_in_days, 30);
}

#[tokio::test]
async fn test_create_post_requires_identity() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/posts", &CreatePostRequest::unique(&[]))
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "MISSING_IDENTITY");
    assert_eq!(body["error"]["message"], "userId not found");
}

#[tokio::test]
async fn test_create_post_rejects_invalid_bodies() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = unique_user();

    let response = server
        .post_as("/api/posts", &user, &serde_json::json!({ "tags": ["a"] }))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .post_as("/api/posts", &user, &CreatePostRequest::new("   ", &[]))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let response = server
        .post_as("/api/posts", &user, &CreatePostRequest::new("x".repeat(301), &[]))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "CONTENT_TOO_LONG");

    let long_tag = "t".repeat(21);
    let response = server
        .post_as("/api/posts", &user, &CreatePostRequest::new("ok", &[&long_tag]))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "TAG_TOO_LONG");
}

#[tokio::test]
async fn test_duplicate_post_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = unique_user();
    let request = CreatePostRequest::unique(&[]);

    create_post(&server, &user, &request).await;
    let response = server.post_as("/api/posts", &user, &request).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "DUPLICATE_POST");
}

#[tokio::test]
async fn test_post_quota() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start_with(&[("POST_MAX_POSTS_PER_HOUR", "2")])
        .await
        .expect("Failed to start server");
    let user = unique_user();

    create_post(&server, &user, &CreatePostRequest::unique(&[])).await;
    create_post(&server, &user, &CreatePostRequest::unique(&[])).await;

    let response = server
        .post_as("/api/posts", &user, &CreatePostRequest::unique(&[]))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::TOO_MANY_REQUESTS).await.unwrap();
    assert_eq!(code, "RATE_LIMIT_EXCEEDED");
}

#[tokio::test]
async fn test_request_rate_limit_is_distinguishable() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start_with(&[
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1"),
        ("RATE_LIMIT_BURST", "3"),
    ])
    .await
    .expect("Failed to start server");

    for _ in 0..3 {
        let response = server.get("/api/posts").await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server.get("/api/posts").await.unwrap();
    let code = assert_error(response, StatusCode::TOO_MANY_REQUESTS).await.unwrap();
    assert_eq!(code, "TOO_MANY_REQUESTS");

    // Health probes sit outside the limiter
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Single Post Tests
// ============================================================================

#[tokio::test]
async fn test_get_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = unique_user();
    let viewer = unique_user();
    let post = create_post(&server, &author, &CreatePostRequest::unique(&["a"])).await;

    vote(&server, &viewer, &post.id, "downvote").await;

    let response = server
        .get_as(&format!("/api/posts/{}", post.id), &viewer)
        .await
        .unwrap();
    let fetched: PostBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, post.id);
    assert_eq!(fetched.down_votes, 1);
    assert_eq!(fetched.user_vote.as_deref(), Some("DOWNVOTE"));

    // Anonymous readers see no vote state
    let response = server.get(&format!("/api/posts/{}", post.id)).await.unwrap();
    let fetched: PostBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(fetched.user_vote.is_none());
}

#[tokio::test]
async fn test_get_post_errors() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/posts/not-a-uuid").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");

    let missing = uuid::Uuid::new_v4();
    let response = server.get(&format!("/api/posts/{missing}")).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "POST_NOT_FOUND");
}

#[tokio::test]
async fn test_restricted_post_is_hidden() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = unique_user();
    let post = create_post(&server, &user, &CreatePostRequest::unique(&[])).await;
    set_post_type(&server.pool, &post.id, "RESTRICTED").await.unwrap();

    let response = server.get(&format!("/api/posts/{}", post.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post_empty_as(&format!("/api/posts/{}/upvote", post.id), &user)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Vote Tests
// ============================================================================

#[tokio::test]
async fn test_upvote_toggle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = unique_user();
    let post = create_post(&server, &unique_user(), &CreatePostRequest::unique(&[])).await;

    let (status, first) = vote(&server, &user, &post.id, "upvote").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first.post_id, post.id);
    assert_eq!(first.action, "created");
    assert_eq!((first.up_votes, first.down_votes), (1, 0));
    assert_eq!(first.user_vote.as_deref(), Some("UPVOTE"));
    assert_eq!(first.expires_in_days, 30);

    let (status, second) = vote(&server, &user, &post.id, "upvote").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second.action, "removed");
    assert_eq!((second.up_votes, second.down_votes), (0, 0));
    assert!(second.user_vote.is_none());

    let (status, third) = vote(&server, &user, &post.id, "upvote").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(third.up_votes, 1);
}

#[tokio::test]
async fn test_vote_flip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = unique_user();
    let post = create_post(&server, &unique_user(), &CreatePostRequest::unique(&[])).await;

    vote(&server, &user, &post.id, "upvote").await;
    let (status, flipped) = vote(&server, &user, &post.id, "downvote").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(flipped.action, "changed");
    assert!(!flipped.message.is_empty());
    assert_eq!((flipped.up_votes, flipped.down_votes), (0, 1));
    assert_eq!(flipped.user_vote.as_deref(), Some("DOWNVOTE"));
}

#[tokio::test]
async fn test_vote_requires_identity() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &unique_user(), &CreatePostRequest::unique(&[])).await;

    let response = server
        .post(&format!("/api/posts/{}/upvote", post.id), &serde_json::json!({}))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "MISSING_IDENTITY");
}

#[tokio::test]
async fn test_vote_quota() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start_with(&[("POST_MAX_VOTES_PER_HOUR", "3")])
        .await
        .expect("Failed to start server");
    let voter = unique_user();
    let author = unique_user();

    let mut posts = Vec::new();
    for _ in 0..4 {
        posts.push(create_post(&server, &author, &CreatePostRequest::unique(&[])).await);
    }
    for post in &posts[..3] {
        let (status, _) = vote(&server, &voter, &post.id, "upvote").await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let response = server
        .post_empty_as(&format!("/api/posts/{}/upvote", posts[3].id), &voter)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::TOO_MANY_REQUESTS).await.unwrap();
    assert_eq!(code, "RATE_LIMIT_EXCEEDED");

    let response = server.get(&format!("/api/posts/{}", posts[3].id)).await.unwrap();
    let untouched: PostBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(untouched.up_votes, 0);
}

#[tokio::test]
async fn test_concurrent_votes_keep_counters_consistent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &unique_user(), &CreatePostRequest::unique(&[])).await;

    let voters: Vec<String> = (0..8).map(|_| unique_user()).collect();
    let requests = voters.iter().map(|voter| vote(&server, voter, &post.id, "upvote"));
    let results = join_all(requests).await;
    assert!(results.iter().all(|(status, _)| *status == StatusCode::CREATED));

    let response = server.get(&format!("/api/posts/{}", post.id)).await.unwrap();
    let fetched: PostBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.up_votes, 8);
}

// ============================================================================
// Feed Tests
// ============================================================================

#[tokio::test]
async fn test_tag_feed_puts_pinned_first() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let tag = unique_tag();
    let author = unique_user();

    let pinned = create_post(&server, &author, &CreatePostRequest::unique(&[&tag])).await;
    let older = create_post(&server, &author, &CreatePostRequest::unique(&[&tag])).await;
    let newer = create_post(&server, &author, &CreatePostRequest::unique(&[&tag])).await;
    create_post(&server, &author, &CreatePostRequest::unique(&["elsewhere"])).await;
    set_post_type(&server.pool, &pinned.id, "PINNED").await.unwrap();

    let page = feed(&server, &format!("tag={tag}&sortBy=new&page=1")).await;
    assert_eq!(page.ids(), vec![pinned.id.as_str(), newer.id.as_str(), older.id.as_str()]);
    assert_eq!(page.total_posts, 2);
    assert_eq!(page.posts[0].post_type, "PINNED");

    let page = feed(&server, &format!("tag={tag}&sortBy=new&page=2")).await;
    assert!(page.posts.is_empty());
    assert_eq!(page.total_posts, 2);
}

#[tokio::test]
async fn test_hot_feed_orders_by_votes() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let tag = unique_tag();
    let author = unique_user();

    let quiet = create_post(&server, &author, &CreatePostRequest::unique(&[&tag])).await;
    let liked = create_post(&server, &author, &CreatePostRequest::unique(&[&tag])).await;
    let disliked = create_post(&server, &author, &CreatePostRequest::unique(&[&tag])).await;

    vote(&server, &unique_user(), &liked.id, "upvote").await;
    vote(&server, &unique_user(), &liked.id, "upvote").await;
    vote(&server, &unique_user(), &disliked.id, "downvote").await;

    let page = feed(&server, &format!("tag={tag}")).await;
    assert_eq!(
        page.ids(),
        vec![liked.id.as_str(), quiet.id.as_str(), disliked.id.as_str()]
    );
}

#[tokio::test]
async fn test_feed_annotates_viewer_votes() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let tag = unique_tag();
    let viewer = unique_user();
    let post = create_post(&server, &unique_user(), &CreatePostRequest::unique(&[&tag])).await;
    vote(&server, &viewer, &post.id, "upvote").await;

    let response = server
        .get_as(&format!("/api/posts?tag={tag}"), &viewer)
        .await
        .unwrap();
    let page: FeedBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.posts[0].user_vote.as_deref(), Some("UPVOTE"));

    let page = feed(&server, &format!("tag={tag}")).await;
    assert!(page.posts[0].user_vote.is_none());
}

#[tokio::test]
async fn test_pages_concatenate_without_gaps() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let tag = unique_tag();
    let authors = [unique_user(), unique_user()];

    for i in 0..7 {
        create_post(&server, &authors[i % 2], &CreatePostRequest::unique(&[&tag])).await;
    }

    let all = feed(&server, &format!("tag={tag}&sortBy=new&limit=9")).await;
    assert_eq!(all.total_posts, 7);

    let mut paged = Vec::new();
    for page in 1..=3 {
        let body = feed(&server, &format!("tag={tag}&sortBy=new&limit=3&page={page}")).await;
        paged.extend(body.posts.into_iter().map(|p| p.id));
    }
    assert_eq!(paged, all.ids());
}

#[tokio::test]
async fn test_lenient_feed_parameters() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let tag = unique_tag();
    create_post(&server, &unique_user(), &CreatePostRequest::unique(&[&tag])).await;

    let page = feed(
        &server,
        &format!("tag={tag}&sortBy=bogus&timePeriod=eon&page=abc&limit=1000"),
    )
    .await;
    assert_eq!(page.posts.len(), 1);
    assert_eq!(page.total_posts, 1);

    // Repeated keys keep their first value
    let page = feed(&server, &format!("tag={tag}&page=1&page=2&sortBy=new&sortBy=top")).await;
    assert_eq!(page.posts.len(), 1);
}
