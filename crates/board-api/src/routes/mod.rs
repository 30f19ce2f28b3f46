//! Route definitions
//!
//! Board endpoints live under /api; health probes sit at the root.

use axum::{routing::{get, post}, Router};

use crate::handlers::{health, posts, votes};
use crate::state::AppState;

/// Create the API router (health routes are mounted separately, outside the
/// request-rate limiter)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", post_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Post and vote routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route("/posts/:post_id", get(posts::get_post))
        .route("/posts/:post_id/upvote", post(votes::upvote))
        .route("/posts/:post_id/downvote", post(votes::downvote))
}
