//! Pinned-posts snapshot shared through Redis.
//!
//! Freshness is delegated to the key's TTL, so every instance sees the same
//! snapshot and the same expiry.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use board_core::entities::Post;
use board_core::error::DomainError;
use board_core::traits::{PinnedPostCache, RepoResult};

use crate::pool::{RedisPool, RedisPoolError};

/// Key holding the JSON-encoded snapshot
pub const PINNED_POSTS_KEY: &str = "board:pinned_posts";

fn map_cache_error(e: RedisPoolError) -> DomainError {
    DomainError::CacheError(e.to_string())
}

/// Pinned posts stored under a single Redis key
#[derive(Debug, Clone)]
pub struct RedisPinnedCache {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl RedisPinnedCache {
    /// Create a store whose snapshots expire after `ttl` (at least one second)
    pub fn new(pool: RedisPool, ttl: Duration) -> Self {
        Self {
            pool,
            ttl_seconds: ttl.as_secs().max(1),
        }
    }
}

#[async_trait]
impl PinnedPostCache for RedisPinnedCache {
    #[instrument(skip(self))]
    async fn get(&self) -> RepoResult<Option<Vec<Post>>> {
        self.pool
            .get_json(PINNED_POSTS_KEY)
            .await
            .map_err(map_cache_error)
    }

    #[instrument(skip(self, posts), fields(count = posts.len()))]
    async fn put(&self, posts: &[Post]) -> RepoResult<()> {
        self.pool
            .set_json(PINNED_POSTS_KEY, posts, self.ttl_seconds)
            .await
            .map_err(map_cache_error)
    }

    #[instrument(skip(self))]
    async fn invalidate(&self) -> RepoResult<()> {
        self.pool
            .delete(PINNED_POSTS_KEY)
            .await
            .map(|_| ())
            .map_err(map_cache_error)
    }
}
