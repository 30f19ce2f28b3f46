//! Vote handlers
//!
//! A fresh vote answers 201; toggling or switching an existing vote answers 200.

use axum::{extract::State, http::StatusCode, Json};
use board_core::{PostId, UserId, VoteDirection};
use board_service::{VoteResponse, VoteService};

use crate::extractors::{Identity, PostIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

async fn vote(
    state: &AppState,
    post_id: PostId,
    user_id: &UserId,
    direction: VoteDirection,
) -> ApiResult<(StatusCode, Json<VoteResponse>)> {
    let response = VoteService::new(state.service_context())
        .vote(post_id, user_id, direction)
        .await?;
    let status = if response.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response)))
}

/// Upvote a post
///
/// POST /api/posts/{post_id}/upvote
pub async fn upvote(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    PostIdPath(post_id): PostIdPath,
) -> ApiResult<(StatusCode, Json<VoteResponse>)> {
    vote(&state, post_id, &user_id, VoteDirection::Up).await
}

/// Downvote a post
///
/// POST /api/posts/{post_id}/downvote
pub async fn downvote(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    PostIdPath(post_id): PostIdPath,
) -> ApiResult<(StatusCode, Json<VoteResponse>)> {
    vote(&state, post_id, &user_id, VoteDirection::Down).await
}
