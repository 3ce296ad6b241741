//! Judging responses into scored verdicts.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a trial ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
    Timeout,
}

impl Outcome {
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// What a verdict does to the running streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakEffect {
    Extend,
    Reset,
    Keep,
}

/// Scored decision for one response (or the lack of one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub outcome: Outcome,
    /// Signed change to the score; the score itself never drops below zero
    pub score_delta: i64,
    pub streak: StreakEffect,
    /// Reaction time sample to record, if this verdict produces one
    pub reaction_time: Option<Duration>,
}

impl Verdict {
    pub fn correct(points: u32, reaction_time: Option<Duration>, streak: StreakEffect) -> Self {
        Self {
            outcome: Outcome::Correct,
            score_delta: i64::from(points),
            streak,
            reaction_time,
        }
    }

    pub fn incorrect(penalty: u32, streak: StreakEffect) -> Self {
        Self {
            outcome: Outcome::Incorrect,
            score_delta: -i64::from(penalty),
            streak,
            reaction_time: None,
        }
    }

    pub fn timeout(penalty: u32, streak: StreakEffect) -> Self {
        Self {
            outcome: Outcome::Timeout,
            score_delta: -i64::from(penalty),
            streak,
            reaction_time: None,
        }
    }

    pub fn is_correct(&self) -> bool {
        self.outcome.is_correct()
    }
}

/// Correctness and scoring rule for one kind of stimulus.
///
/// A judge is pure: it sees the stimulus, the response and the measured
/// reaction time, and returns a [`Verdict`]. Malformed responses are simply
/// incorrect.
pub trait Judge {
    type Stimulus;
    type Response: ?Sized;

    /// Score a response given `reaction_time` after the trial started.
    fn judge(
        &self,
        stimulus: &Self::Stimulus,
        response: &Self::Response,
        reaction_time: Duration,
    ) -> Verdict;

    /// Score a trial whose response window ran out.
    fn timeout(&self, stimulus: &Self::Stimulus) -> Verdict;
}
