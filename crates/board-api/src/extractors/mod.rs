//! Axum extractors for request handling
//!
//! Custom extractors for the anonymous identity, feed parameters, path ids,
//! and validated JSON bodies.

mod feed;
mod identity;
mod path;
mod validated;

pub use feed::{FeedParams, FeedParamsRaw};
pub use identity::{Identity, OptionalIdentity};
pub use path::PostIdPath;
pub use validated::ValidatedJson;
