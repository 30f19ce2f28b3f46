//! Entity to DTO mappers
//!
//! Posts are projected for a specific viewer at a specific instant, so these
//! are constructors rather than plain `From` conversions.

use chrono::{DateTime, Utc};

use board_core::entities::{Post, VoteOutcome};
use board_core::feed::expires_in_days;
use board_core::value_objects::VoteType;

use super::responses::{ProcessedPost, VoteResponse};

// ============================================================================
// Post Mappers
// ============================================================================

impl ProcessedPost {
    /// Project a post for a viewer whose stored vote is `vote`
    pub fn new(post: &Post, vote: Option<VoteType>, now: DateTime<Utc>) -> Self {
        Self {
            id: post.id,
            content: post.content.clone(),
            tags: post.tags.clone(),
            post_type: post.post_type,
            up_votes: post.up_votes,
            down_votes: post.down_votes,
            created_at: post.created_at,
            updated_at: post.updated_at,
            expired_at: post.expired_at,
            expires_in_days: post.expires_in_days(now),
            user_vote: vote.and_then(VoteType::visible),
        }
    }
}

// ============================================================================
// Vote Mappers
// ============================================================================

impl VoteResponse {
    pub fn from_outcome(outcome: &VoteOutcome, now: DateTime<Utc>) -> Self {
        Self {
            post_id: outcome.post_id,
            action: outcome.transition.action,
            message: outcome.transition.message(),
            up_votes: outcome.up_votes,
            down_votes: outcome.down_votes,
            user_vote: outcome.transition.user_vote(),
            expires_in_days: expires_in_days(outcome.expired_at, now),
        }
    }
}
