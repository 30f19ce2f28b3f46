//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

use super::post_settings::PostSettings;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub pinned_cache: PinnedCacheConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub identity: IdentityConfig,
    pub posts: PostSettings,
    pub reaper: ReaperConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Where the pinned-posts snapshot lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheBackend {
    /// Per-process snapshot; instances may disagree for up to one TTL
    #[default]
    Memory,
    /// Shared snapshot in Redis
    Redis,
}

/// Pinned-posts cache configuration
#[derive(Debug, Clone)]
pub struct PinnedCacheConfig {
    pub backend: CacheBackend,
    /// Present whenever `backend` is `Redis`
    pub redis: Option<RedisConfig>,
}

/// HTTP request throttling
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Anonymous identity transport
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub cookie_name: String,
}

/// Background purge of long-expired posts
#[derive(Debug, Clone)]
pub struct ReaperConfig {
    pub enabled: bool,
    pub interval: Duration,
    /// Posts are purged this many days after they expire
    pub grace_days: u32,
}

// Default value functions
fn default_app_name() -> String {
    "board-server".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_cookie_name() -> String {
    "userId".to_string()
}

const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_MIN_CONNECTIONS: u32 = 5;
const DEFAULT_REDIS_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;
const DEFAULT_BURST: u32 = 50;
const DEFAULT_REAPER_INTERVAL_SECS: u64 = 3600;
const DEFAULT_REAPER_GRACE_DAYS: u32 = 7;

/// Longest span, in days, any day-valued setting may cover
const MAX_DAYS: u32 = 36_500;
/// Longest span, in seconds, of the quota window, cache TTL and reaper interval
const MAX_PERIOD_SECS: u64 = 365 * 24 * 60 * 60;

/// Typed access to a key/value source
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn string(&self, name: &'static str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.string(name).ok_or(ConfigError::MissingVar(name))
    }

    fn parsed<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, ConfigError> {
        self.string(name)
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(name, raw))
            })
            .transpose()
    }

    fn parsed_or<T: FromStr>(&self, name: &'static str, default: T) -> Result<T, ConfigError> {
        Ok(self.parsed(name)?.unwrap_or(default))
    }

    /// Like `parsed_or`, rejecting values outside `range`
    fn ranged_or<T>(&self, name: &'static str, default: T, range: RangeInclusive<T>) -> Result<T, ConfigError>
    where
        T: FromStr + PartialOrd + Display,
    {
        let value = self.parsed_or(name, default)?;
        if range.contains(&value) {
            Ok(value)
        } else {
            Err(ConfigError::InvalidValue(
                name,
                format!("{value} (expected {}..={})", range.start(), range.end()),
            ))
        }
    }
}

/// Checks that relate two post settings
fn check_post_settings(posts: PostSettings) -> Result<PostSettings, ConfigError> {
    if posts.default_expiration_days > posts.max_expiration_days {
        return Err(ConfigError::InvalidValue(
            "POST_DEFAULT_EXPIRATION_DAYS",
            format!(
                "{} exceeds POST_MAX_EXPIRATION_DAYS {}",
                posts.default_expiration_days, posts.max_expiration_days
            ),
        ));
    }
    if posts.default_page_size > posts.max_page_size {
        return Err(ConfigError::InvalidValue(
            "POST_DEFAULT_PAGE_SIZE",
            format!(
                "{} exceeds POST_MAX_PAGE_SIZE {}",
                posts.default_page_size, posts.max_page_size
            ),
        ));
    }
    Ok(posts)
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };
        let defaults = PostSettings::default();

        let backend = match vars.string("PINNED_CACHE_BACKEND").as_deref().map(str::trim) {
            None | Some("memory") => CacheBackend::Memory,
            Some("redis") => CacheBackend::Redis,
            Some(other) => {
                return Err(ConfigError::InvalidValue("PINNED_CACHE_BACKEND", other.to_string()))
            }
        };
        let redis = match backend {
            CacheBackend::Memory => None,
            CacheBackend::Redis => Some(RedisConfig {
                url: vars.required("REDIS_URL")?,
                max_connections: vars
                    .parsed_or("REDIS_MAX_CONNECTIONS", DEFAULT_REDIS_MAX_CONNECTIONS)?,
            }),
        };

        Ok(Self {
            app: AppSettings {
                name: vars.string("APP_NAME").unwrap_or_else(default_app_name),
                env: vars
                    .string("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: vars.string("API_HOST").unwrap_or_else(default_host),
                port: vars
                    .parsed("API_PORT")?
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_connections: vars.parsed_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
                min_connections: vars.parsed_or("DATABASE_MIN_CONNECTIONS", DEFAULT_MIN_CONNECTIONS)?,
            },
            pinned_cache: PinnedCacheConfig { backend, redis },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parsed_or("RATE_LIMIT_REQUESTS_PER_SECOND", DEFAULT_REQUESTS_PER_SECOND)?,
                burst: vars.parsed_or("RATE_LIMIT_BURST", DEFAULT_BURST)?,
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .string("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            identity: IdentityConfig {
                cookie_name: vars
                    .string("IDENTITY_COOKIE_NAME")
                    .unwrap_or_else(default_cookie_name),
            },
            posts: check_post_settings(PostSettings {
                default_expiration_days: vars.ranged_or(
                    "POST_DEFAULT_EXPIRATION_DAYS",
                    defaults.default_expiration_days,
                    1..=MAX_DAYS,
                )?,
                max_expiration_days: vars.ranged_or(
                    "POST_MAX_EXPIRATION_DAYS",
                    defaults.max_expiration_days,
                    1..=MAX_DAYS,
                )?,
                max_votes_per_hour: vars
                    .parsed_or("POST_MAX_VOTES_PER_HOUR", defaults.max_votes_per_hour)?,
                max_posts_per_hour: vars
                    .parsed_or("POST_MAX_POSTS_PER_HOUR", defaults.max_posts_per_hour)?,
                rate_limit_window: Duration::from_secs(vars.ranged_or(
                    "POST_RATE_LIMIT_WINDOW_SECS",
                    defaults.rate_limit_window.as_secs(),
                    1..=MAX_PERIOD_SECS,
                )?),
                hot_retrospective_days: vars.ranged_or(
                    "POST_HOT_RETROSPECTIVE_DAYS",
                    defaults.hot_retrospective_days,
                    1..=MAX_DAYS,
                )?,
                pinned_cache_ttl: Duration::from_secs(vars.ranged_or(
                    "POST_PINNED_CACHE_TTL_SECS",
                    defaults.pinned_cache_ttl.as_secs(),
                    0..=MAX_PERIOD_SECS,
                )?),
                default_page_size: vars.ranged_or(
                    "POST_DEFAULT_PAGE_SIZE",
                    defaults.default_page_size,
                    1..=u32::MAX,
                )?,
                max_page_size: vars.ranged_or("POST_MAX_PAGE_SIZE", defaults.max_page_size, 1..=u32::MAX)?,
                max_tags_per_post: vars.parsed_or("POST_MAX_TAGS", defaults.max_tags_per_post)?,
                max_tag_length: vars.parsed_or("POST_MAX_TAG_LENGTH", defaults.max_tag_length)?,
                max_content_length: vars
                    .parsed_or("POST_MAX_CONTENT_LENGTH", defaults.max_content_length)?,
            })?,
            reaper: ReaperConfig {
                enabled: vars.parsed_or("REAPER_ENABLED", false)?,
                interval: Duration::from_secs(vars.ranged_or(
                    "REAPER_INTERVAL_SECS",
                    DEFAULT_REAPER_INTERVAL_SECS,
                    1..=MAX_PERIOD_SECS,
                )?),
                grace_days: vars.ranged_or("REAPER_GRACE_DAYS", DEFAULT_REAPER_GRACE_DAYS, 0..=MAX_DAYS)?,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
