//! Process-local pinned-posts snapshot.
//!
//! Instances in a multi-node deployment may disagree for up to one TTL.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::RwLock;

use board_core::entities::Post;
use board_core::traits::{PinnedPostCache, RepoResult};

#[derive(Debug)]
struct Snapshot {
    stored_at: Instant,
    posts: Vec<Post>,
}

/// Pinned posts held in memory behind a read-write lock
#[derive(Debug)]
pub struct InMemoryPinnedCache {
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl InMemoryPinnedCache {
    /// Create an empty cache whose snapshots stay fresh for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            snapshot: RwLock::new(None),
        }
    }
}

#[async_trait]
impl PinnedPostCache for InMemoryPinnedCache {
    async fn get(&self) -> RepoResult<Option<Vec<Post>>> {
        let guard = self.snapshot.read();
        Ok(guard
            .as_ref()
            .filter(|s| s.stored_at.elapsed() < self.ttl)
            .map(|s| s.posts.clone()))
    }

    async fn put(&self, posts: &[Post]) -> RepoResult<()> {
        *self.snapshot.write() = Some(Snapshot {
            stored_at: Instant::now(),
            posts: posts.to_vec(),
        });
        Ok(())
    }

    async fn invalidate(&self) -> RepoResult<()> {
        self.snapshot.write().take();
        Ok(())
    }
}
