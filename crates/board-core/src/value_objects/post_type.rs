//! Post type - controls feed placement and visibility

use serde::{Deserialize, Serialize};
use std::fmt;

/// Post type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostType {
    /// Regular post, paginated and ranked
    #[default]
    Standard,
    /// Shown above standard results on the first page
    Pinned,
    /// Never visible through the public API
    Restricted,
}

impl PostType {
    /// Database / wire representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::Pinned => "PINNED",
            Self::Restricted => "RESTRICTED",
        }
    }

    /// Parse the stored representation. Unknown values are treated as restricted
    /// so that a corrupt row can never leak into a public feed.
    #[must_use]
    pub fn from_db(value: &str) -> Self {
        match value {
            "STANDARD" => Self::Standard,
            "PINNED" => Self::Pinned,
            _ => Self::Restricted,
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
