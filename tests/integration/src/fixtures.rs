//! Test fixtures and data generators

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// An anonymous identity that no earlier test run has used
pub fn unique_user() -> String {
    format!("fp-{}-{}", Uuid::new_v4().simple(), unique_suffix())
}

/// A tag that isolates one test's posts from everything else in the database
pub fn unique_tag() -> String {
    format!("t{}", &Uuid::new_v4().simple().to_string()[..12])
}

/// Create post request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_days: Option<serde_json::Value>,
}

impl CreatePostRequest {
    pub fn new(content: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            content: content.into(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            expiration_days: None,
        }
    }

    /// Content no other test will submit
    pub fn unique(tags: &[&str]) -> Self {
        Self::new(format!("post {}", Uuid::new_v4()), tags)
    }
}

/// Post as returned by the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBody {
    pub id: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub post_type: String,
    pub up_votes: i32,
    pub down_votes: i32,
    pub expires_in_days: i64,
    pub user_vote: Option<String>,
}

/// Feed page as returned by the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedBody {
    pub posts: Vec<PostBody>,
    pub total_posts: i64,
}

impl FeedBody {
    pub fn ids(&self) -> Vec<&str> {
        self.posts.iter().map(|p| p.id.as_str()).collect()
    }
}

/// Vote result as returned by the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteBody {
    pub post_id: String,
    pub action: String,
    pub message: String,
    pub up_votes: i32,
    pub down_votes: i32,
    pub user_vote: Option<String>,
    pub expires_in_days: i64,
}

/// Flip a post's type directly in the store; the API only creates STANDARD posts
pub async fn set_post_type(pool: &PgPool, post_id: &str, post_type: &str) -> anyhow::Result<()> {
    let id = Uuid::parse_str(post_id)?;
    sqlx::query("UPDATE posts SET type = $1 WHERE id = $2")
        .bind(post_type)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
