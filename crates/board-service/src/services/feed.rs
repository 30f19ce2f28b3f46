//! Feed service
//!
//! Assembles sorted, paginated, viewer-annotated pages of visible posts, with
//! pinned posts placed above the first page.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use board_core::entities::Post;
use board_core::feed::FeedQuery;
use board_core::traits::RepoResult;
use board_core::value_objects::{PostId, UserId, VoteType};
use board_core::DomainError;

use crate::dto::{FeedResponse, ProcessedPost};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Feed service
pub struct FeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedService<'a> {
    /// Create a new FeedService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// One page of the feed as seen by `viewer`
    #[instrument(skip(self))]
    pub async fn feed(&self, query: &FeedQuery, viewer: Option<&UserId>) -> ServiceResult<FeedResponse> {
        let now = Utc::now();
        let settings = self.ctx.settings();
        let filter = query.filter(now, settings.hot_retrospective_days);
        let repo = self.ctx.post_repo();

        let (page, total_posts, pinned) = futures::try_join!(
            repo.find_feed(&filter, query.sort, i64::from(query.limit), query.offset()),
            repo.count_feed(&filter),
            self.pinned_posts(query, now),
        )?;

        let posts = merge_pinned(pinned, page);
        let votes = self.viewer_votes(viewer, &posts).await?;

        debug!(count = posts.len(), total_posts, "Feed assembled");

        Ok(FeedResponse {
            posts: posts
                .iter()
                .map(|p| ProcessedPost::new(p, votes.get(&p.id).copied(), now))
                .collect(),
            total_posts,
        })
    }

    /// A single visible post as seen by `viewer`
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: PostId, viewer: Option<&UserId>) -> ServiceResult<ProcessedPost> {
        let now = Utc::now();
        let post = self
            .ctx
            .post_repo()
            .find_visible(post_id, now)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        let votes = self.viewer_votes(viewer, std::slice::from_ref(&post)).await?;
        Ok(ProcessedPost::new(&post, votes.get(&post.id).copied(), now))
    }

    /// Pinned posts for the first page.
    ///
    /// Tagged queries read the store directly and clear the shared snapshot.
    /// Cache failures degrade to a store read.
    async fn pinned_posts(&self, query: &FeedQuery, now: DateTime<Utc>) -> RepoResult<Vec<Post>> {
        if !query.is_first_page() {
            return Ok(Vec::new());
        }

        let cache = self.ctx.pinned_cache();
        let repo = self.ctx.post_repo();

        if let Some(tag) = query.tag.as_deref() {
            if let Err(e) = cache.invalidate().await {
                warn!(error = %e, "Failed to clear pinned-posts cache");
            }
            return repo.find_pinned(Some(tag), now).await;
        }

        match cache.get().await {
            Ok(Some(posts)) => {
                debug!(count = posts.len(), "Pinned-posts cache hit");
                return Ok(posts.into_iter().filter(|p| p.is_visible(now)).collect());
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to read pinned-posts cache"),
        }

        let posts = repo.find_pinned(None, now).await?;
        match cache.put(&posts).await {
            Ok(()) => info!(count = posts.len(), "Pinned-posts cache refreshed"),
            Err(e) => warn!(error = %e, "Failed to store pinned-posts cache"),
        }
        Ok(posts)
    }

    /// The viewer's stored votes on `posts`, in one lookup
    async fn viewer_votes(
        &self,
        viewer: Option<&UserId>,
        posts: &[Post],
    ) -> ServiceResult<HashMap<PostId, VoteType>> {
        let Some(viewer) = viewer else {
            return Ok(HashMap::new());
        };
        if posts.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<PostId> = posts.iter().map(|p| p.id).collect();
        let votes = self.ctx.vote_repo().find_by_user(viewer, &ids).await?;
        Ok(votes.into_iter().map(|v| (v.post_id, v.vote_type)).collect())
    }
}

/// Pinned posts first; a standard post that is also pinned keeps only its
/// pinned position
fn merge_pinned(pinned: Vec<Post>, page: Vec<Post>) -> Vec<Post> {
    let pinned_ids: HashSet<PostId> = pinned.iter().map(|p| p.id).collect();
    let mut merged = pinned;
    merged.extend(page.into_iter().filter(|p| !pinned_ids.contains(&p.id)));
    merged
}
