//! Session identity and the feedback channel shown to players.

use crate::trial::Outcome;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifies one played game. A new id is issued every time a game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Last outcome as the player sees it: ✓/✗ plus a short message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub outcome: Outcome,
    pub message: String,
    pub score_delta: i64,
}

impl Feedback {
    pub fn new(outcome: Outcome, message: impl Into<String>, score_delta: i64) -> Self {
        Self {
            outcome,
            message: message.into(),
            score_delta,
        }
    }

    /// Check or cross mark for the outcome.
    pub fn mark(&self) -> char {
        if self.outcome.is_correct() {
            '✓'
        } else {
            '✗'
        }
    }
}
