//! # board-service
//!
//! Application layer containing the board's use cases, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    CreatePostRequest, FeedResponse, HealthChecks, HealthResponse, ProcessedPost,
    ReadinessResponse, VoteResponse,
};
pub use services::{
    FeedService, PostService, RateLimiter, ReaperService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, VoteService,
};
