//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in board-core.

mod activity;
mod error;
mod post;
mod vote;

pub use activity::PgActivityRepository;
pub use post::PgPostRepository;
pub use vote::PgVoteRepository;
