//! Service context - dependency container for services
//!
//! Holds the repositories, the pinned-posts cache, and the board thresholds.

use std::sync::Arc;

use board_cache::RedisPool;
use board_common::PostSettings;
use board_core::traits::{ActivityRepository, PinnedPostCache, PostRepository, VoteRepository};
use board_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// The pools are only used for readiness probes; all data access goes
/// through the repository traits.
#[derive(Clone)]
pub struct ServiceContext {
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,

    post_repo: Arc<dyn PostRepository>,
    vote_repo: Arc<dyn VoteRepository>,
    activity_repo: Arc<dyn ActivityRepository>,

    pinned_cache: Arc<dyn PinnedPostCache>,

    settings: PostSettings,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool, if one backs the repositories
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Get the Redis connection pool, if the Redis cache backend is in use
    pub fn redis_pool(&self) -> Option<&RedisPool> {
        self.redis_pool.as_ref()
    }

    // === Repositories ===

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    pub fn activity_repo(&self) -> &dyn ActivityRepository {
        self.activity_repo.as_ref()
    }

    // === Cache ===

    pub fn pinned_cache(&self) -> &dyn PinnedPostCache {
        self.pinned_cache.as_ref()
    }

    // === Settings ===

    pub fn settings(&self) -> &PostSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("redis_pool", &self.redis_pool)
            .field("repositories", &"...")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
    post_repo: Option<Arc<dyn PostRepository>>,
    vote_repo: Option<Arc<dyn VoteRepository>>,
    activity_repo: Option<Arc<dyn ActivityRepository>>,
    pinned_cache: Option<Arc<dyn PinnedPostCache>>,
    settings: Option<PostSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn vote_repo(mut self, repo: Arc<dyn VoteRepository>) -> Self {
        self.vote_repo = Some(repo);
        self
    }

    pub fn activity_repo(mut self, repo: Arc<dyn ActivityRepository>) -> Self {
        self.activity_repo = Some(repo);
        self
    }

    pub fn pinned_cache(mut self, cache: Arc<dyn PinnedPostCache>) -> Self {
        self.pinned_cache = Some(cache);
        self
    }

    pub fn settings(mut self, settings: PostSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool,
            redis_pool: self.redis_pool,
            post_repo: self
                .post_repo
                .ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            vote_repo: self
                .vote_repo
                .ok_or_else(|| ServiceError::validation("vote_repo is required"))?,
            activity_repo: self
                .activity_repo
                .ok_or_else(|| ServiceError::validation("activity_repo is required"))?,
            pinned_cache: self
                .pinned_cache
                .ok_or_else(|| ServiceError::validation("pinned_cache is required"))?,
            settings: self.settings.unwrap_or_default(),
        })
    }
}
