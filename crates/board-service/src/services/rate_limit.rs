//! Per-user action quotas
//!
//! Counts the user's recent activity in the store; nothing is held in memory,
//! so every instance enforces the same quota.

use chrono::{DateTime, Duration, Utc};
use tracing::{instrument, warn};

use board_core::value_objects::{ActionKind, UserId};
use board_core::DomainError;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Rate limiter for posts and votes
pub struct RateLimiter<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RateLimiter<'a> {
    /// Create a new RateLimiter
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Quota for one action kind within the window
    pub fn limit_for(&self, kind: ActionKind) -> u32 {
        let settings = self.ctx.settings();
        match kind {
            ActionKind::Vote => settings.max_votes_per_hour,
            ActionKind::Post => settings.max_posts_per_hour,
        }
    }

    /// Start of the trailing window ending at `now`
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let window = Duration::from_std(self.ctx.settings().rate_limit_window)
            .unwrap_or_else(|_| Duration::hours(1));
        now - window
    }

    /// Reject the action when the user is at or over quota
    #[instrument(skip(self))]
    pub async fn check(&self, user_id: &UserId, kind: ActionKind, now: DateTime<Utc>) -> ServiceResult<()> {
        let limit = i64::from(self.limit_for(kind));
        let count = self
            .ctx
            .activity_repo()
            .count_since(user_id, kind, self.window_start(now))
            .await?;

        if count >= limit {
            warn!(user_id = %user_id, %kind, count, limit, "Rate limit exceeded");
            return Err(DomainError::RateLimitExceeded {
                action: kind,
                window_secs: self.ctx.settings().rate_limit_window.as_secs(),
            }
            .into());
        }

        Ok(())
    }
}
