//! Application services

mod context;
mod error;
mod feed;
mod post;
mod rate_limit;
mod reaper;
mod vote;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use feed::FeedService;
pub use post::PostService;
pub use rate_limit::RateLimiter;
pub use reaper::ReaperService;
pub use vote::VoteService;
