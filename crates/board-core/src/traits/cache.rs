//! Pinned-posts snapshot cache
//!
//! Holds the untagged set of visible PINNED posts for a bounded time. The
//! snapshot carries no per-user data, so one copy serves every caller.

use async_trait::async_trait;

use super::repositories::RepoResult;
use crate::entities::Post;

#[async_trait]
pub trait PinnedPostCache: Send + Sync {
    /// The stored snapshot, or `None` when empty or older than the TTL
    async fn get(&self) -> RepoResult<Option<Vec<Post>>>;

    /// Replace the snapshot and restart its TTL
    async fn put(&self, posts: &[Post]) -> RepoResult<()>;

    /// Drop the snapshot
    async fn invalidate(&self) -> RepoResult<()>;
}
