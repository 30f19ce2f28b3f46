//! Vote service
//!
//! Applies upvote/downvote requests through the vote state machine.

use chrono::{Duration, Utc};
use tracing::{info, instrument};

use board_core::entities::VoteCommand;
use board_core::value_objects::{ActionKind, PostId, UserId, VoteDirection};

use crate::dto::VoteResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::rate_limit::RateLimiter;

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply one vote request.
    ///
    /// The quota is checked before the store transaction starts, so a
    /// rejected request never mutates anything.
    #[instrument(skip(self))]
    pub async fn vote(
        &self,
        post_id: PostId,
        user_id: &UserId,
        direction: VoteDirection,
    ) -> ServiceResult<VoteResponse> {
        let now = Utc::now();
        RateLimiter::new(self.ctx)
            .check(user_id, ActionKind::Vote, now)
            .await?;

        let days = i64::from(self.ctx.settings().default_expiration_days);
        let command = VoteCommand {
            post_id,
            user_id: user_id.clone(),
            direction,
            now,
            extend_to: now + Duration::days(days),
        };

        let outcome = self.ctx.vote_repo().apply_vote(&command).await?;

        info!(
            post_id = %post_id,
            user_id = %user_id,
            action = ?outcome.transition.action,
            up_votes = outcome.up_votes,
            down_votes = outcome.down_votes,
            "Vote applied"
        );

        Ok(VoteResponse::from_outcome(&outcome, now))
    }
}
