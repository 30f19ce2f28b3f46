//! Feed query model
//!
//! Sorting, time windows, and pagination for the public post feed.

use chrono::{DateTime, Duration, Months, Utc};

/// Feed ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortBy {
    /// Most upvoted within a fixed recency window
    #[default]
    Hot,
    /// Newest first
    New,
    /// Most upvoted within the requested time period
    Top,
}

impl SortBy {
    /// Lenient parse: unknown or missing values fall back to `Hot`
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("new") => Self::New,
            Some("top") => Self::Top,
            _ => Self::Hot,
        }
    }
}

/// Time period applied to `Top`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimePeriod {
    #[default]
    Day,
    Week,
    Month,
    All,
}

impl TimePeriod {
    /// Lenient parse: unknown or missing values fall back to `Day`
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("week") => Self::Week,
            Some("month") => Self::Month,
            Some("all") => Self::All,
            _ => Self::Day,
        }
    }

    /// Earliest creation time included by this period, if bounded
    pub fn since(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Day => Some(now - Duration::days(1)),
            Self::Week => Some(now - Duration::days(7)),
            Self::Month => now.checked_sub_months(Months::new(1)),
            Self::All => None,
        }
    }
}

/// A fully resolved feed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub sort: SortBy,
    pub time_period: TimePeriod,
    pub tag: Option<String>,
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            sort: SortBy::Hot,
            time_period: TimePeriod::Day,
            tag: None,
            page: 1,
            limit: 20,
        }
    }
}

impl FeedQuery {
    /// Rows skipped before this page
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.limit)
    }

    /// Only the first page carries pinned posts
    pub fn is_first_page(&self) -> bool {
        self.page <= 1
    }

    /// Creation-time lower bound implied by the sort order.
    ///
    /// `Hot` looks back a fixed number of days regardless of `time_period`.
    pub fn created_since(&self, now: DateTime<Utc>, hot_retrospective_days: u32) -> Option<DateTime<Utc>> {
        match self.sort {
            SortBy::New => None,
            SortBy::Top => self.time_period.since(now),
            SortBy::Hot => Some(now - Duration::days(i64::from(hot_retrospective_days))),
        }
    }

    /// Build the row filter for this query
    pub fn filter(&self, now: DateTime<Utc>, hot_retrospective_days: u32) -> FeedFilter {
        FeedFilter {
            now,
            tag: self.tag.clone(),
            created_since: self.created_since(now, hot_retrospective_days),
        }
    }
}

/// Row filter shared by the page query and the total count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFilter {
    /// Posts must expire strictly after this instant
    pub now: DateTime<Utc>,
    /// Exact, case-sensitive tag name
    pub tag: Option<String>,
    pub created_since: Option<DateTime<Utc>>,
}

/// Whole days until `expired_at`, rounded up and floored at zero
pub fn expires_in_days(expired_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

    let Some(expired_at) = expired_at else {
        return 0;
    };
    let remaining_ms = (expired_at - now).num_milliseconds();
    if remaining_ms <= 0 {
        return 0;
    }
    (remaining_ms + MS_PER_DAY - 1) / MS_PER_DAY
}
