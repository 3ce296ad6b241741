//! Generic timed trial engine.
//!
//! A trial is one timed stimulus/response unit. Both games run their timed
//! parts through [`TrialRunner`], parameterized by a [`StimulusGenerator`]
//! and a [`Judge`].

mod generator;
mod judge;
mod runner;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use generator::StimulusGenerator;
pub use judge::{Judge, Outcome, StreakEffect, Verdict};
pub use runner::{ActiveTrial, Resolution, TrialRunner};

/// Identifier of a presented trial, unique within one runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrialId(pub u64);

impl fmt::Display for TrialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
