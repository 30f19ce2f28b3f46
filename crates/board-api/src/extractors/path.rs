//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use board_core::PostId;

use crate::response::ApiError;

/// A `:post_id` path segment parsed as a [`PostId`]
#[derive(Debug, Clone, Copy)]
pub struct PostIdPath(pub PostId);

#[async_trait]
impl<S> FromRequestParts<S> for PostIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        PostId::parse(&raw)
            .map(PostIdPath)
            .map_err(|_| ApiError::invalid_path("Invalid postId format"))
    }
}
