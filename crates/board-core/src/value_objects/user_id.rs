//! Anonymous user identifier
//!
//! An opaque string issued client-side (fingerprint cookie). The domain never
//! interprets it beyond equality.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest identifier accepted from a client
pub const MAX_USER_ID_LEN: usize = 256;

/// Opaque anonymous user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Build an identifier from raw client input.
    ///
    /// Returns `None` for blank or oversized values.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > MAX_USER_ID_LEN {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// Wrap an identifier that was validated before it was persisted
    #[inline]
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    /// Borrow the raw identifier
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
