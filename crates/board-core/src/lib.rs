//! # board-core
//!
//! Domain layer for the ephemeral posting board: entities, value objects,
//! the vote state machine, the feed query model, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod feed;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    normalize_tags, transition, CounterDelta, Post, Vote, VoteAction, VoteCommand,
    VoteOutcome, VoteState, VoteTransition,
};
pub use error::DomainError;
pub use feed::{expires_in_days, FeedFilter, FeedQuery, SortBy, TimePeriod};
pub use traits::{
    ActivityRepository, PinnedPostCache, PostRepository, RepoResult, VoteRepository,
};
pub use value_objects::{
    ActionKind, PostId, PostIdParseError, PostType, UserId, VoteDirection, VoteType,
};
