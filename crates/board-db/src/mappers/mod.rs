//! Entity to model mappers
//!
//! `From<Model> for Entity` conversions from database rows to domain objects.
//! Vote rows with an unknown type fail the conversion.

mod post;
mod vote;

pub use vote::parse_vote_type;
