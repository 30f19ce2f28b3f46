//! Post service
//!
//! Creates posts after content, tag, quota, and duplicate checks.

use chrono::Utc;
use tracing::{info, instrument};

use board_core::entities::{normalize_tags, Post};
use board_core::value_objects::{ActionKind, UserId};
use board_core::DomainError;

use crate::dto::{CreatePostRequest, ProcessedPost};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::rate_limit::RateLimiter;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post authored by `author`.
    ///
    /// Content is stored exactly as submitted; tags are trimmed, de-duplicated
    /// and truncated to the configured count.
    #[instrument(skip(self, request))]
    pub async fn create(&self, author: &UserId, request: CreatePostRequest) -> ServiceResult<ProcessedPost> {
        let settings = self.ctx.settings();

        if request.content.trim().is_empty() {
            return Err(ServiceError::validation("Content must not be empty"));
        }
        if request.content.chars().count() > settings.max_content_length {
            return Err(DomainError::ContentTooLong {
                max: settings.max_content_length,
            }
            .into());
        }

        let tags = normalize_tags(&request.tags, settings.max_tags_per_post);
        if tags.iter().any(|t| t.chars().count() > settings.max_tag_length) {
            return Err(DomainError::TagTooLong {
                max: settings.max_tag_length,
            }
            .into());
        }

        let now = Utc::now();
        RateLimiter::new(self.ctx)
            .check(author, ActionKind::Post, now)
            .await?;

        let repo = self.ctx.post_repo();
        if repo.has_active_duplicate(author, &request.content, now).await? {
            return Err(DomainError::DuplicatePost.into());
        }

        let days = settings.resolve_expiration_days(request.expiration_days.as_ref());
        let post = Post::new(author.clone(), request.content, tags, days, now);
        repo.create(&post).await?;

        info!(post_id = %post.id, tags = post.tags.len(), expiration_days = days, "Post created");

        Ok(ProcessedPost::new(&post, None, now))
    }
}
