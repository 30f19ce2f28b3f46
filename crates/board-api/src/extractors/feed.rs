//! Feed query extractor
//!
//! Query parsing is lenient: unknown or malformed values fall back to their
//! defaults instead of rejecting the request, and a repeated key keeps its
//! first value.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Query},
    http::{request::Parts, Uri},
};
use board_common::PostSettings;
use board_core::{FeedQuery, SortBy, TimePeriod};

use crate::response::ApiError;
use crate::state::AppState;

/// Raw feed query parameters, kept as text
#[derive(Debug, Default)]
pub struct FeedParamsRaw {
    pub sort_by: Option<String>,
    pub time_period: Option<String>,
    pub tag: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl FeedParamsRaw {
    /// Collect known keys from decoded query pairs; unknown keys are ignored
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "sortBy" => &mut raw.sort_by,
                "timePeriod" => &mut raw.time_period,
                "tag" => &mut raw.tag,
                "page" => &mut raw.page,
                "limit" => &mut raw.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        raw
    }

    /// Decode the query string of `uri`
    pub fn from_uri(uri: &Uri) -> Result<Self, ApiError> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;
        Ok(Self::from_pairs(pairs))
    }

    /// Resolve into a feed query using the configured page sizes
    pub fn resolve(&self, settings: &PostSettings) -> FeedQuery {
        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let limit = settings.resolve_page_size(
            self.limit.as_deref().and_then(|l| l.trim().parse::<u32>().ok()),
        );
        let tag = self
            .tag
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        FeedQuery {
            sort: SortBy::from_param(self.sort_by.as_deref()),
            time_period: TimePeriod::from_param(self.time_period.as_deref()),
            tag,
            page,
            limit,
        }
    }
}

/// Resolved feed query
#[derive(Debug, Clone)]
pub struct FeedParams(pub FeedQuery);

#[async_trait]
impl<S> FromRequestParts<S> for FeedParams
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = FeedParamsRaw::from_uri(&parts.uri)?;

        let app_state = AppState::from_ref(state);
        Ok(FeedParams(raw.resolve(app_state.service_context().settings())))
    }
}
