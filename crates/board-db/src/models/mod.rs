//! Database models - SQLx-compatible structs for PostgreSQL tables

mod post;
mod vote;

pub use post::{PostModel, VoteCountersModel};
pub use vote::VoteModel;
