//! Configuration structs

mod app_config;
mod post_settings;

pub use app_config::{
    AppConfig, AppSettings, CacheBackend, ConfigError, CorsConfig, DatabaseConfig, Environment,
    IdentityConfig, PinnedCacheConfig, RateLimitConfig, ReaperConfig, RedisConfig, ServerConfig,
};
pub use post_settings::PostSettings;
