//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Post, Vote, VoteCommand, VoteOutcome};
use crate::error::DomainError;
use crate::feed::{FeedFilter, SortBy};
use crate::value_objects::{ActionKind, PostId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post that is visible at `now` (unexpired, not restricted)
    async fn find_visible(&self, id: PostId, now: DateTime<Utc>) -> RepoResult<Option<Post>>;

    /// One page of visible STANDARD posts matching the filter
    async fn find_feed(
        &self,
        filter: &FeedFilter,
        sort: SortBy,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Post>>;

    /// Count of visible STANDARD posts matching the filter
    async fn count_feed(&self, filter: &FeedFilter) -> RepoResult<i64>;

    /// Visible PINNED posts, newest first, optionally restricted to a tag
    async fn find_pinned(&self, tag: Option<&str>, now: DateTime<Utc>) -> RepoResult<Vec<Post>>;

    /// Whether the author already has an unexpired post with identical content
    async fn has_active_duplicate(
        &self,
        author_id: &UserId,
        content: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<bool>;

    /// Persist a new post together with its tags (tags are upserted by name).
    ///
    /// Fails with `DuplicatePost` when the author already has an unexpired
    /// post with identical content, checked atomically with the insert.
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Hard-delete posts whose expiry is at or before `cutoff`
    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> RepoResult<u64>;
}

// ============================================================================
// Vote Repository
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// The user's vote rows for the given posts
    async fn find_by_user(&self, user_id: &UserId, post_ids: &[PostId]) -> RepoResult<Vec<Vote>>;

    /// Atomically evaluate and apply a vote request.
    ///
    /// Locks the post and the (post, user) vote row, runs the state machine,
    /// writes both rows, and commits. Fails with `PostNotFound` without
    /// mutating anything when the post is not visible.
    async fn apply_vote(&self, command: &VoteCommand) -> RepoResult<VoteOutcome>;
}

// ============================================================================
// Activity Repository (rate limiting)
// ============================================================================

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Count the user's actions of `kind` recorded at or after `since`
    async fn count_since(
        &self,
        user_id: &UserId,
        kind: ActionKind,
        since: DateTime<Utc>,
    ) -> RepoResult<i64>;
}
