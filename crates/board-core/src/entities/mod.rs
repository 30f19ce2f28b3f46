//! Domain entities - core business objects

mod post;
mod tag;
mod vote;

pub use post::Post;
pub use tag::normalize_tags;
pub use vote::{
    transition, CounterDelta, Vote, VoteAction, VoteCommand, VoteOutcome, VoteState,
    VoteTransition,
};
