//! Vote entity and the vote state machine
//!
//! Each (post, user) pair owns at most one vote row. A vote request never
//! deletes that row; it moves it between states:
//!
//! | current          | Up                          | Down                          |
//! |------------------|-----------------------------|-------------------------------|
//! | none / cancelled | upvoted, up +1, extend      | downvoted, down +1, extend    |
//! | upvoted          | cancelled, up -1            | downvoted, up -1, down +1     |
//! | downvoted        | upvoted, down -1, up +1     | cancelled, down -1            |
//!
//! Expiry is only extended when a fresh vote lands, so flipping an existing
//! vote can never keep a stale post alive.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::value_objects::{PostId, UserId, VoteDirection, VoteType};

/// Vote entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id: Uuid,
    pub post_id: PostId,
    pub user_id: UserId,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Effective state of a (post, user) pair before a vote is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteState {
    None,
    Upvoted,
    Downvoted,
    Cancelled,
}

impl From<Option<VoteType>> for VoteState {
    fn from(existing: Option<VoteType>) -> Self {
        match existing {
            None => Self::None,
            Some(VoteType::Upvote) => Self::Upvoted,
            Some(VoteType::Downvote) => Self::Downvoted,
            Some(VoteType::Cancelled) => Self::Cancelled,
        }
    }
}

/// What a transition did, from the voter's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteAction {
    /// No active vote before; one now
    Created,
    /// Switched between up and down
    Changed,
    /// Active vote withdrawn
    Removed,
}

/// Signed change to a post's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterDelta {
    pub up: i32,
    pub down: i32,
}

impl CounterDelta {
    /// Apply to a pair of counters, never going below zero
    #[must_use]
    pub fn apply(self, up_votes: i32, down_votes: i32) -> (i32, i32) {
        (
            up_votes.saturating_add(self.up).max(0),
            down_votes.saturating_add(self.down).max(0),
        )
    }
}

/// Result of evaluating one vote request against the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTransition {
    pub direction: VoteDirection,
    pub next: VoteType,
    pub delta: CounterDelta,
    pub action: VoteAction,
}

impl VoteTransition {
    /// Fresh votes push the post's expiry forward
    #[inline]
    pub fn extends_expiration(&self) -> bool {
        self.action == VoteAction::Created
    }

    /// Client-facing vote state after the transition
    #[inline]
    pub fn user_vote(&self) -> Option<VoteType> {
        self.next.visible()
    }

    /// Human readable summary
    pub fn message(&self) -> String {
        match (self.action, self.direction) {
            (VoteAction::Created, VoteDirection::Up) => "Upvoted!".to_string(),
            (VoteAction::Created, VoteDirection::Down) => "Downvoted!".to_string(),
            (VoteAction::Removed, VoteDirection::Up) => "Upvote removed".to_string(),
            (VoteAction::Removed, VoteDirection::Down) => "Downvote removed".to_string(),
            (VoteAction::Changed, direction) => format!("Vote changed to {}", direction.noun()),
        }
    }
}

/// Decide the next vote state and counter delta.
///
/// Pure: persistence applies the returned delta inside one transaction.
pub fn transition(current: VoteState, direction: VoteDirection) -> VoteTransition {
    let (next, up, down, action) = match (current, direction) {
        (VoteState::None | VoteState::Cancelled, VoteDirection::Up) => {
            (VoteType::Upvote, 1, 0, VoteAction::Created)
        }
        (VoteState::None | VoteState::Cancelled, VoteDirection::Down) => {
            (VoteType::Downvote, 0, 1, VoteAction::Created)
        }
        (VoteState::Upvoted, VoteDirection::Up) => (VoteType::Cancelled, -1, 0, VoteAction::Removed),
        (VoteState::Upvoted, VoteDirection::Down) => {
            (VoteType::Downvote, -1, 1, VoteAction::Changed)
        }
        (VoteState::Downvoted, VoteDirection::Up) => (VoteType::Upvote, 1, -1, VoteAction::Changed),
        (VoteState::Downvoted, VoteDirection::Down) => {
            (VoteType::Cancelled, 0, -1, VoteAction::Removed)
        }
    };

    VoteTransition {
        direction,
        next,
        delta: CounterDelta { up, down },
        action,
    }
}

/// A request to vote, as handed to the vote store
#[derive(Debug, Clone)]
pub struct VoteCommand {
    pub post_id: PostId,
    pub user_id: UserId,
    pub direction: VoteDirection,
    pub now: DateTime<Utc>,
    /// New expiry applied when the transition creates a fresh vote
    pub extend_to: DateTime<Utc>,
}

/// The committed result of a vote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteOutcome {
    pub post_id: PostId,
    pub transition: VoteTransition,
    pub up_votes: i32,
    pub down_votes: i32,
    pub expired_at: Option<DateTime<Utc>>,
}
