//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` and use camelCase field names.
//! Author identifiers are never exposed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use board_core::entities::VoteAction;
use board_core::value_objects::{PostId, PostType, VoteType};

// ============================================================================
// Post Responses
// ============================================================================

/// A post as shown to one viewer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedPost {
    pub id: PostId,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub up_votes: i32,
    pub down_votes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expired_at: Option<DateTime<Utc>>,
    pub expires_in_days: i64,
    /// The viewer's active vote; `null` when none or withdrawn
    pub user_vote: Option<VoteType>,
}

/// One page of the feed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub posts: Vec<ProcessedPost>,
    /// Visible STANDARD posts matching the filter, pinned excluded
    pub total_posts: i64,
}

// ============================================================================
// Vote Responses
// ============================================================================

/// Result of an upvote or downvote request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub post_id: PostId,
    pub action: VoteAction,
    pub message: String,
    pub up_votes: i32,
    pub down_votes: i32,
    pub user_vote: Option<VoteType>,
    pub expires_in_days: i64,
}

impl VoteResponse {
    /// Whether the request created a fresh vote
    pub fn is_created(&self) -> bool {
        self.action == VoteAction::Created
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    /// Present only when the Redis pinned-cache backend is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<String>,
}

fn check_label(healthy: bool) -> String {
    if healthy { "healthy" } else { "unhealthy" }.to_string()
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: Option<bool>) -> Self {
        let all_healthy = database_healthy && redis_healthy.unwrap_or(true);
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: check_label(database_healthy),
                redis: redis_healthy.map(check_label),
            },
        }
    }

    /// Whether every configured dependency is healthy
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
