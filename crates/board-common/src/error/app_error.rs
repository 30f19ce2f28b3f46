//! Application error types
//!
//! Failures raised while wiring and running the server process. Request-level
//! errors travel through the service and API layers instead.

/// Startup and runtime failure of the server process
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
