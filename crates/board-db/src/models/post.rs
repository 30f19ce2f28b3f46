//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for posts table, with its tags aggregated in position order
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: Uuid,
    pub user_id: String,
    pub content: String,
    pub post_type: String,
    pub up_votes: i32,
    pub down_votes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expired_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

/// Counters returned after a vote is applied
#[derive(Debug, Clone, Copy, FromRow)]
pub struct VoteCountersModel {
    pub up_votes: i32,
    pub down_votes: i32,
    pub expired_at: Option<DateTime<Utc>>,
}
