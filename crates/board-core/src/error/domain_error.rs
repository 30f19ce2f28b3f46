//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{ActionKind, PostId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found or expired: {0}")]
    PostNotFound(PostId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("userId not found")]
    MissingIdentity,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Tag too long: max {max} characters")]
    TagTooLong { max: usize },

    // =========================================================================
    // Rate Limiting
    // =========================================================================
    #[error("Rate limit exceeded: too many {action}s in the last {window_secs} seconds")]
    RateLimitExceeded { action: ActionKind, window_secs: u64 },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("An active post with the same content already exists")]
    DuplicatePost,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::PostNotFound(_) => "POST_NOT_FOUND",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MissingIdentity => "MISSING_IDENTITY",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::TagTooLong { .. } => "TAG_TOO_LONG",

            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",

            Self::DuplicatePost => "DUPLICATE_POST",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PostNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::MissingIdentity
                | Self::ContentTooLong { .. }
                | Self::TagTooLong { .. }
        )
    }

    /// Check if this is a rate-limit rejection
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicatePost)
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_validation() {
            400
        } else if self.is_rate_limited() {
            429
        } else if self.is_conflict() {
            409
        } else {
            500
        }
    }
}
