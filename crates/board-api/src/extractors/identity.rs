//! Anonymous identity extractor
//!
//! Reads the opaque user identifier from the identity cookie. The server
//! never issues or verifies the value.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use board_core::{DomainError, UserId};

use crate::response::ApiError;
use crate::state::AppState;

/// Identifier carried by the named cookie, if present and well-formed
pub fn identity_from_jar(jar: &CookieJar, cookie_name: &str) -> Option<UserId> {
    jar.get(cookie_name).and_then(|c| UserId::parse(c.value()))
}

fn resolve<S>(parts: &Parts, state: &S) -> Option<UserId>
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    let app_state = AppState::from_ref(state);
    let jar = CookieJar::from_headers(&parts.headers);
    identity_from_jar(&jar, app_state.identity_cookie())
}

/// Required identity for write paths
#[derive(Debug, Clone)]
pub struct Identity(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        resolve(parts, state)
            .map(Identity)
            .ok_or(ApiError::Domain(DomainError::MissingIdentity))
    }
}

/// Optional identity for read paths
///
/// A missing or malformed cookie yields `None`; reads then carry no
/// per-user vote state.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<UserId>);

impl OptionalIdentity {
    /// Borrow the identifier, if any
    pub fn user_id(&self) -> Option<&UserId> {
        self.0.as_ref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalIdentity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalIdentity(resolve(parts, state)))
    }
}
