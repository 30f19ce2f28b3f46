//! Post handlers
//!
//! Endpoints for the feed, single posts, and post creation.

use axum::{extract::State, Json};
use board_service::{CreatePostRequest, FeedResponse, FeedService, PostService, ProcessedPost};

use crate::extractors::{FeedParams, Identity, OptionalIdentity, PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List posts
///
/// GET /api/posts?sortBy=&timePeriod=&tag=&page=&limit=
pub async fn list_posts(
    State(state): State<AppState>,
    viewer: OptionalIdentity,
    FeedParams(query): FeedParams,
) -> ApiResult<Json<FeedResponse>> {
    let service = FeedService::new(state.service_context());
    let feed = service.feed(&query, viewer.user_id()).await?;
    Ok(Json(feed))
}

/// Get a single post
///
/// GET /api/posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    viewer: OptionalIdentity,
    PostIdPath(post_id): PostIdPath,
) -> ApiResult<Json<ProcessedPost>> {
    let service = FeedService::new(state.service_context());
    let post = service.get_post(post_id, viewer.user_id()).await?;
    Ok(Json(post))
}

/// Create a post
///
/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    Identity(author): Identity,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<ProcessedPost>>> {
    let service = PostService::new(state.service_context());
    let post = service.create(&author, request).await?;
    Ok(Created(Json(post)))
}
