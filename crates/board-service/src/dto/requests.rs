//! Request DTOs for API endpoints
//!
//! Request DTOs implement `Deserialize` and `Validate` for shape validation.
//! Configured limits (content length, tag length) are enforced by the services.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("Content must not be empty")));
    }
    Ok(())
}

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(custom(function = "not_blank"))]
    pub content: String,

    /// Raw list; normalized and truncated by the service
    #[serde(default)]
    #[validate(length(max = 64, message = "Too many tags"))]
    pub tags: Vec<String>,

    /// Kept as raw JSON: anything but a positive integer means "use the default"
    #[serde(default)]
    pub expiration_days: Option<serde_json::Value>,
}
