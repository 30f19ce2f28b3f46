//! Vote type and requested direction

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored state of a vote row.
///
/// `Cancelled` is a tombstone: the row keeps its (post, user) slot but
/// counts for neither counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoteType {
    Upvote,
    Downvote,
    Cancelled,
}

impl VoteType {
    /// Database representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upvote => "UPVOTE",
            Self::Downvote => "DOWNVOTE",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parse the stored representation
    #[must_use]
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "UPVOTE" => Some(Self::Upvote),
            "DOWNVOTE" => Some(Self::Downvote),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// The vote as exposed to a client: tombstones read as "no vote"
    #[must_use]
    pub fn visible(self) -> Option<Self> {
        match self {
            Self::Cancelled => None,
            other => Some(other),
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction requested by a vote action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// The vote type this direction produces
    #[must_use]
    pub fn vote_type(self) -> VoteType {
        match self {
            Self::Up => VoteType::Upvote,
            Self::Down => VoteType::Downvote,
        }
    }

    /// Noun used in client messages
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Self::Up => "upvote",
            Self::Down => "downvote",
        }
    }
}
