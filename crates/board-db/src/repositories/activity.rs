//! PostgreSQL implementation of ActivityRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use board_core::traits::{ActivityRepository, RepoResult};
use board_core::value_objects::{ActionKind, UserId};

use super::error::map_db_error;

/// Counts a user's recent posts and votes for rate limiting
#[derive(Clone)]
pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    /// Create a new PgActivityRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    #[instrument(skip(self))]
    async fn count_since(
        &self,
        user_id: &UserId,
        kind: ActionKind,
        since: DateTime<Utc>,
    ) -> RepoResult<i64> {
        // Rows count by creation; re-voting an older post does not
        let sql = match kind {
            ActionKind::Post => {
                "SELECT COUNT(*) FROM posts WHERE user_id = $1 AND created_at >= $2"
            }
            ActionKind::Vote => {
                "SELECT COUNT(*) FROM votes WHERE user_id = $1 AND created_at >= $2"
            }
        };

        sqlx::query_scalar::<_, i64>(sql)
            .bind(user_id.as_str())
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
