//! Value objects - immutable types that represent domain concepts

mod action;
mod post_id;
mod post_type;
mod user_id;
mod vote_type;

pub use action::ActionKind;
pub use post_id::{PostId, PostIdParseError};
pub use post_type::PostType;
pub use user_id::UserId;
pub use vote_type::{VoteDirection, VoteType};
