//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use board_core::entities::Post;
use board_core::error::DomainError;
use board_core::feed::{FeedFilter, SortBy};
use board_core::traits::{PostRepository, RepoResult};
use board_core::value_objects::{PostId, UserId};

use crate::models::PostModel;

use super::error::map_db_error;

/// Post columns plus the tag names in insertion order
const POST_SELECT: &str = r#"
    SELECT p.id, p.user_id, p.content, p.type AS post_type, p.up_votes, p.down_votes,
           p.created_at, p.updated_at, p.expired_at,
           COALESCE(
               (SELECT ARRAY_AGG(t.name ORDER BY pt.position)
                FROM post_tags pt
                JOIN tags t ON t.id = pt.tag_id
                WHERE pt.post_id = p.id),
               ARRAY[]::TEXT[]
           ) AS tags
    FROM posts p
"#;

/// `$1` now, `$2` optional tag, `$3` optional lower bound on `created_at`
const FEED_WHERE: &str = r#"
    WHERE p.type = 'STANDARD'
      AND p.expired_at > $1
      AND ($2::TEXT IS NULL OR EXISTS (
            SELECT 1
            FROM post_tags pt
            JOIN tags t ON t.id = pt.tag_id
            WHERE pt.post_id = p.id AND t.name = $2))
      AND ($3::TIMESTAMPTZ IS NULL OR p.created_at >= $3)
"#;

fn order_by(sort: SortBy) -> &'static str {
    match sort {
        SortBy::New => "p.created_at DESC, p.id DESC",
        SortBy::Hot | SortBy::Top => {
            "p.up_votes DESC, p.down_votes ASC, p.created_at DESC, p.id DESC"
        }
    }
}

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_visible(&self, id: PostId, now: DateTime<Utc>) -> RepoResult<Option<Post>> {
        let sql = format!(
            "{POST_SELECT} WHERE p.id = $1 AND p.expired_at > $2 AND p.type <> 'RESTRICTED'"
        );
        let result = sqlx::query_as::<_, PostModel>(&sql)
            .bind(id.into_inner())
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn find_feed(
        &self,
        filter: &FeedFilter,
        sort: SortBy,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Post>> {
        let sql = format!(
            "{POST_SELECT} {FEED_WHERE} ORDER BY {} LIMIT $4 OFFSET $5",
            order_by(sort)
        );
        let results = sqlx::query_as::<_, PostModel>(&sql)
            .bind(filter.now)
            .bind(filter.tag.as_deref())
            .bind(filter.created_since)
            .bind(limit.max(0))
            .bind(offset.max(0))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_feed(&self, filter: &FeedFilter) -> RepoResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM posts p {FEED_WHERE}");
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(filter.now)
            .bind(filter.tag.as_deref())
            .bind(filter.created_since)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_pinned(&self, tag: Option<&str>, now: DateTime<Utc>) -> RepoResult<Vec<Post>> {
        let sql = format!(
            r#"{POST_SELECT}
            WHERE p.type = 'PINNED'
              AND p.expired_at > $1
              AND ($2::TEXT IS NULL OR EXISTS (
                    SELECT 1
                    FROM post_tags pt
                    JOIN tags t ON t.id = pt.tag_id
                    WHERE pt.post_id = p.id AND t.name = $2))
            ORDER BY p.created_at DESC, p.id DESC"#
        );
        let results = sqlx::query_as::<_, PostModel>(&sql)
            .bind(now)
            .bind(tag)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self, content))]
    async fn has_active_duplicate(
        &self,
        author_id: &UserId,
        content: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM posts
                WHERE user_id = $1 AND content = $2 AND expired_at > $3
            )
            "#,
        )
        .bind(author_id.as_str())
        .bind(content)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Serialize one author's creates so the duplicate recheck below is exact
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(post.author_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let duplicate = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM posts
                WHERE user_id = $1 AND content = $2 AND expired_at > $3
            )
            "#,
        )
        .bind(post.author_id.as_str())
        .bind(&post.content)
        .bind(post.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if duplicate {
            return Err(DomainError::DuplicatePost);
        }

        sqlx::query(
            r#"
            INSERT INTO posts (id, user_id, content, type, up_votes, down_votes, created_at, updated_at, expired_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(post.id.into_inner())
        .bind(post.author_id.as_str())
        .bind(&post.content)
        .bind(post.post_type.as_str())
        .bind(post.up_votes)
        .bind(post.down_votes)
        .bind(post.created_at)
        .bind(post.updated_at)
        .bind(post.expired_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if !post.tags.is_empty() {
            // Sorted insert order and DO NOTHING: existing tag rows are never
            // locked, and concurrent inserts of new names cannot wait in a cycle
            sqlx::query(
                r#"
                INSERT INTO tags (name)
                SELECT name FROM unnest($1::text[]) AS t(name)
                ORDER BY name
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(&post.tags)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            sqlx::query(
                r#"
                INSERT INTO post_tags (post_id, tag_id, position)
                SELECT $1, tags.id, (u.ordinality - 1)::smallint
                FROM unnest($2::text[]) WITH ORDINALITY AS u(name, ordinality)
                JOIN tags ON tags.name = u.name
                ON CONFLICT (post_id, tag_id) DO NOTHING
                "#,
            )
            .bind(post.id.into_inner())
            .bind(&post.tags)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE expired_at IS NOT NULL AND expired_at <= $1
            "#,
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
