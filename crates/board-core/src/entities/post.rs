//! Post entity - a short text submission with tags, counters, and an expiry

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::feed::expires_in_days;
use crate::value_objects::{PostId, PostType, UserId};

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub content: String,
    pub tags: Vec<String>,
    pub post_type: PostType,
    pub up_votes: i32,
    pub down_votes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expired_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new standard post with zeroed counters that expires
    /// `expiration_days` after `now`
    pub fn new(
        author_id: UserId,
        content: String,
        tags: Vec<String>,
        expiration_days: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PostId::generate(),
            author_id,
            content,
            tags,
            post_type: PostType::Standard,
            up_votes: 0,
            down_votes: 0,
            created_at: now,
            updated_at: now,
            expired_at: Some(now + Duration::days(i64::from(expiration_days))),
        }
    }

    /// Set the post type
    pub fn with_type(mut self, post_type: PostType) -> Self {
        self.post_type = post_type;
        self
    }

    /// Check whether the post has expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expired_at.is_none_or(|at| at <= now)
    }

    /// Visible posts are unexpired and not restricted
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired(now) && self.post_type != PostType::Restricted
    }

    /// Whole days until expiry, rounded up and floored at zero
    pub fn expires_in_days(&self, now: DateTime<Utc>) -> i64 {
        expires_in_days(self.expired_at, now)
    }

    /// Check if the post carries the given tag (exact, case-sensitive)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
