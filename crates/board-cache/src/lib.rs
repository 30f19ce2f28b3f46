//! # board-cache
//!
//! Snapshot cache for pinned posts.
//!
//! ## Features
//!
//! - **In-process snapshot**: one copy per server instance, guarded by a lock
//! - **Redis snapshot**: shared across instances through a deadpool-managed pool
//!
//! ## Example
//!
//! ```ignore
//! use board_cache::{InMemoryPinnedCache, RedisPinnedCache, RedisPool};
//!
//! let local = InMemoryPinnedCache::new(settings.pinned_cache_ttl);
//!
//! let pool = RedisPool::from_config(&redis_config)?;
//! let shared = RedisPinnedCache::new(pool, settings.pinned_cache_ttl);
//! ```

pub mod pinned;
pub mod pool;

pub use pinned::{InMemoryPinnedCache, RedisPinnedCache, PINNED_POSTS_KEY};
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
