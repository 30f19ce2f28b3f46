//! Pinned-posts snapshot stores.

mod memory;
mod redis_store;

pub use memory::InMemoryPinnedCache;
pub use redis_store::{RedisPinnedCache, PINNED_POSTS_KEY};
