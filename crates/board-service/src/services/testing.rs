//! In-memory repository fakes for service tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use board_cache::InMemoryPinnedCache;
use board_common::PostSettings;
use board_core::entities::{transition, Post, Vote, VoteCommand, VoteOutcome, VoteState};
use board_core::feed::{FeedFilter, SortBy};
use board_core::traits::{ActivityRepository, PostRepository, RepoResult, VoteRepository};
use board_core::value_objects::{ActionKind, PostId, PostType, UserId};
use board_core::DomainError;

use super::context::ServiceContext;

#[derive(Default)]
struct State {
    posts: Vec<Post>,
    votes: Vec<Vote>,
}

/// One store implementing every repository trait
#[derive(Default)]
pub struct FakeStore {
    state: Mutex<State>,
    pinned_queries: AtomicUsize,
}

impl FakeStore {
    pub fn insert(&self, post: Post) {
        self.state.lock().posts.push(post);
    }

    pub fn post(&self, id: PostId) -> Option<Post> {
        self.state.lock().posts.iter().find(|p| p.id == id).cloned()
    }

    /// Number of times PINNED posts were read from the store
    pub fn pinned_queries(&self) -> usize {
        self.pinned_queries.load(Ordering::SeqCst)
    }
}

fn matches_tag(post: &Post, tag: Option<&str>) -> bool {
    tag.is_none_or(|t| post.has_tag(t))
}

fn feed_rows(posts: &[Post], filter: &FeedFilter) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| p.post_type == PostType::Standard)
        .filter(|p| p.expired_at.is_some_and(|at| at > filter.now))
        .filter(|p| matches_tag(p, filter.tag.as_deref()))
        .filter(|p| filter.created_since.is_none_or(|since| p.created_at >= since))
        .cloned()
        .collect()
}

#[async_trait]
impl PostRepository for FakeStore {
    async fn find_visible(&self, id: PostId, now: DateTime<Utc>) -> RepoResult<Option<Post>> {
        Ok(self.post(id).filter(|p| p.is_visible(now)))
    }

    async fn find_feed(
        &self,
        filter: &FeedFilter,
        sort: SortBy,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Post>> {
        let mut rows = feed_rows(&self.state.lock().posts, filter);
        rows.sort_by(|a, b| match sort {
            SortBy::New => b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)),
            SortBy::Hot | SortBy::Top => b
                .up_votes
                .cmp(&a.up_votes)
                .then(a.down_votes.cmp(&b.down_votes))
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id)),
        });
        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_feed(&self, filter: &FeedFilter) -> RepoResult<i64> {
        Ok(feed_rows(&self.state.lock().posts, filter).len() as i64)
    }

    async fn find_pinned(&self, tag: Option<&str>, now: DateTime<Utc>) -> RepoResult<Vec<Post>> {
        self.pinned_queries.fetch_add(1, Ordering::SeqCst);
        let mut rows: Vec<Post> = self
            .state
            .lock()
            .posts
            .iter()
            .filter(|p| p.post_type == PostType::Pinned && !p.is_expired(now))
            .filter(|p| matches_tag(p, tag))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn has_active_duplicate(
        &self,
        author_id: &UserId,
        content: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<bool> {
        Ok(self
            .state
            .lock()
            .posts
            .iter()
            .any(|p| &p.author_id == author_id && p.content == content && !p.is_expired(now)))
    }

    async fn create(&self, post: &Post) -> RepoResult<()> {
        let mut state = self.state.lock();
        let duplicate = state.posts.iter().any(|p| {
            p.author_id == post.author_id && p.content == post.content && !p.is_expired(post.created_at)
        });
        if duplicate {
            return Err(DomainError::DuplicatePost);
        }
        state.posts.push(post.clone());
        Ok(())
    }

    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        let mut state = self.state.lock();
        let before = state.posts.len();
        state
            .posts
            .retain(|p| p.expired_at.is_none_or(|at| at > cutoff));
        Ok((before - state.posts.len()) as u64)
    }
}

#[async_trait]
impl VoteRepository for FakeStore {
    async fn find_by_user(&self, user_id: &UserId, post_ids: &[PostId]) -> RepoResult<Vec<Vote>> {
        Ok(self
            .state
            .lock()
            .votes
            .iter()
            .filter(|v| &v.user_id == user_id && post_ids.contains(&v.post_id))
            .cloned()
            .collect())
    }

    async fn apply_vote(&self, command: &VoteCommand) -> RepoResult<VoteOutcome> {
        let mut state = self.state.lock();
        let State { posts, votes } = &mut *state;

        let post = posts
            .iter_mut()
            .find(|p| p.id == command.post_id && p.is_visible(command.now))
            .ok_or(DomainError::PostNotFound(command.post_id))?;

        let existing = votes
            .iter()
            .position(|v| v.post_id == command.post_id && v.user_id == command.user_id);
        let current = VoteState::from(existing.map(|i| votes[i].vote_type));
        let transition = transition(current, command.direction);

        match existing {
            Some(i) => {
                votes[i].vote_type = transition.next;
                votes[i].updated_at = command.now;
            }
            None => {
                votes.push(Vote {
                    id: Uuid::new_v4(),
                    post_id: command.post_id,
                    user_id: command.user_id.clone(),
                    vote_type: transition.next,
                    created_at: command.now,
                    updated_at: command.now,
                });
            }
        }

        (post.up_votes, post.down_votes) = transition.delta.apply(post.up_votes, post.down_votes);
        if transition.extends_expiration() {
            post.expired_at = Some(command.extend_to);
        }
        post.updated_at = command.now;

        Ok(VoteOutcome {
            post_id: post.id,
            transition,
            up_votes: post.up_votes,
            down_votes: post.down_votes,
            expired_at: post.expired_at,
        })
    }
}

#[async_trait]
impl ActivityRepository for FakeStore {
    async fn count_since(
        &self,
        user_id: &UserId,
        kind: ActionKind,
        since: DateTime<Utc>,
    ) -> RepoResult<i64> {
        let state = self.state.lock();
        let count = match kind {
            ActionKind::Post => state
                .posts
                .iter()
                .filter(|p| &p.author_id == user_id && p.created_at >= since)
                .count(),
            ActionKind::Vote => state
                .votes
                .iter()
                .filter(|v| &v.user_id == user_id && v.created_at >= since)
                .count(),
        };
        Ok(count as i64)
    }
}

/// A context backed by a fresh fake store and an in-memory pinned cache
pub fn context_with(settings: PostSettings) -> (ServiceContext, Arc<FakeStore>) {
    let store = Arc::new(FakeStore::default());
    let ctx = ServiceContext::builder()
        .post_repo(store.clone())
        .vote_repo(store.clone())
        .activity_repo(store.clone())
        .pinned_cache(Arc::new(InMemoryPinnedCache::new(settings.pinned_cache_ttl)))
        .settings(settings)
        .build()
        .unwrap();
    (ctx, store)
}

pub fn context() -> (ServiceContext, Arc<FakeStore>) {
    context_with(PostSettings::default())
}

pub fn user(name: &str) -> UserId {
    UserId::parse(name).unwrap()
}

/// A visible post created `age` ago
pub fn post_aged(content: &str, tags: &[&str], age: Duration) -> Post {
    let created = Utc::now() - chrono::Duration::from_std(age).unwrap();
    Post::new(
        user("author"),
        content.to_string(),
        tags.iter().map(|t| (*t).to_string()).collect(),
        30,
        created,
    )
}

pub fn post(content: &str, tags: &[&str]) -> Post {
    post_aged(content, tags, Duration::from_secs(60))
}
