//! Repository and cache traits (ports)

mod cache;
mod repositories;

pub use cache::PinnedPostCache;
pub use repositories::{ActivityRepository, PostRepository, RepoResult, VoteRepository};
