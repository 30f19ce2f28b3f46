//! Posting-board thresholds
//!
//! Every limit the board enforces is injected from here; nothing downstream
//! hard-codes them.

use std::time::Duration;

/// Board thresholds and feed defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSettings {
    /// Lifetime of a new post, and the expiry pushed forward by a fresh vote
    pub default_expiration_days: u32,
    /// Upper bound on a caller-supplied lifetime
    pub max_expiration_days: u32,
    pub max_votes_per_hour: u32,
    pub max_posts_per_hour: u32,
    /// Trailing window for the per-user limits
    pub rate_limit_window: Duration,
    /// Lookback window for the "hot" ranking
    pub hot_retrospective_days: u32,
    pub pinned_cache_ttl: Duration,
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub max_tags_per_post: usize,
    pub max_tag_length: usize,
    pub max_content_length: usize,
}

impl Default for PostSettings {
    fn default() -> Self {
        Self {
            default_expiration_days: 30,
            max_expiration_days: 365,
            max_votes_per_hour: 60,
            max_posts_per_hour: 10,
            rate_limit_window: Duration::from_secs(60 * 60),
            hot_retrospective_days: 7,
            pinned_cache_ttl: Duration::from_secs(60 * 60),
            default_page_size: 20,
            max_page_size: 100,
            max_tags_per_post: 5,
            max_tag_length: 20,
            max_content_length: 300,
        }
    }
}

impl PostSettings {
    /// Resolve a caller-supplied lifetime.
    ///
    /// Positive integers are honored up to `max_expiration_days`; anything
    /// else (absent, zero, negative, fractional, non-numeric) gets the default.
    pub fn resolve_expiration_days(&self, requested: Option<&serde_json::Value>) -> u32 {
        requested
            .and_then(serde_json::Value::as_u64)
            .filter(|days| *days > 0)
            .map_or(self.default_expiration_days, |days| {
                u32::try_from(days)
                    .unwrap_or(u32::MAX)
                    .min(self.max_expiration_days)
            })
    }

    /// Resolve a requested page size: values outside `1..=max_page_size`
    /// fall back to the default
    pub fn resolve_page_size(&self, requested: Option<u32>) -> u32 {
        requested
            .filter(|limit| (1..=self.max_page_size).contains(limit))
            .unwrap_or(self.default_page_size)
    }
}
