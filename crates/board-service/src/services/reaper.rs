//! Expired-post reaper
//!
//! Hard-deletes posts whose expiry passed more than a grace period ago.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaper service
pub struct ReaperService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReaperService<'a> {
    /// Create a new ReaperService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Delete posts that expired at or before `now - grace_days`.
    ///
    /// Returns the number of posts removed; their tag links and votes go with them.
    #[instrument(skip(self))]
    pub async fn purge(&self, now: DateTime<Utc>, grace_days: u32) -> ServiceResult<u64> {
        let cutoff = now - Duration::days(i64::from(grace_days));
        let purged = self.ctx.post_repo().purge_expired(cutoff).await?;

        if purged > 0 {
            info!(purged, %cutoff, "Purged expired posts");
        } else {
            debug!(%cutoff, "No expired posts to purge");
        }
        Ok(purged)
    }
}
