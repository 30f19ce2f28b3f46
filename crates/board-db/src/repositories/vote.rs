//! PostgreSQL implementation of VoteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use board_core::entities::{transition, Vote, VoteCommand, VoteOutcome, VoteState};
use board_core::traits::{RepoResult, VoteRepository};
use board_core::value_objects::{PostId, UserId};

use crate::mappers::parse_vote_type;
use crate::models::{VoteCountersModel, VoteModel};

use super::error::{map_db_error, post_not_found};

/// PostgreSQL implementation of VoteRepository
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    /// Create a new PgVoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self, post_ids), fields(count = post_ids.len()))]
    async fn find_by_user(&self, user_id: &UserId, post_ids: &[PostId]) -> RepoResult<Vec<Vote>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = post_ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, VoteModel>(
            r#"
            SELECT id, post_id, user_id, type AS vote_type, created_at, updated_at
            FROM votes
            WHERE user_id = $1 AND post_id = ANY($2)
            "#,
        )
        .bind(user_id.as_str())
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Vote::try_from).collect()
    }

    #[instrument(skip(self, command), fields(post_id = %command.post_id, direction = ?command.direction))]
    async fn apply_vote(&self, command: &VoteCommand) -> RepoResult<VoteOutcome> {
        let post_id = command.post_id.into_inner();
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the post first so concurrent voters on it serialize here
        let locked = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM posts
            WHERE id = $1 AND expired_at > $2 AND type <> 'RESTRICTED'
            FOR UPDATE
            "#,
        )
        .bind(post_id)
        .bind(command.now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if locked.is_none() {
            return Err(post_not_found(command.post_id));
        }

        let existing = sqlx::query_scalar::<_, String>(
            r#"
            SELECT type FROM votes
            WHERE post_id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
        .bind(post_id)
        .bind(command.user_id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let current = VoteState::from(existing.as_deref().map(parse_vote_type).transpose()?);
        let transition = transition(current, command.direction);
        debug!(?current, next = %transition.next, "Applying vote transition");

        sqlx::query(
            r#"
            INSERT INTO votes (id, post_id, user_id, type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (post_id, user_id)
            DO UPDATE SET type = EXCLUDED.type, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(post_id)
        .bind(command.user_id.as_str())
        .bind(transition.next.as_str())
        .bind(command.now)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let extend_to = transition.extends_expiration().then_some(command.extend_to);

        let counters = sqlx::query_as::<_, VoteCountersModel>(
            r#"
            UPDATE posts
            SET up_votes = GREATEST(up_votes + $2, 0),
                down_votes = GREATEST(down_votes + $3, 0),
                expired_at = COALESCE($4, expired_at),
                updated_at = $5
            WHERE id = $1
            RETURNING up_votes, down_votes, expired_at
            "#,
        )
        .bind(post_id)
        .bind(transition.delta.up)
        .bind(transition.delta.down)
        .bind(extend_to)
        .bind(command.now)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(VoteOutcome {
            post_id: command.post_id,
            transition,
            up_votes: counters.up_votes,
            down_votes: counters.down_votes,
            expired_at: counters.expired_at,
        })
    }
}
