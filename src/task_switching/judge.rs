//! Task-switching scoring.

use crate::config::TaskSwitchingConfig;
use crate::task_switching::stimulus::TaskStimulus;
use crate::trial::{Judge, StreakEffect, Verdict};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The two response keys.
///
/// K1 (`q`) means "even" for the top box and "round" for the bottom box;
/// K2 (`p`) means "odd" or "angular".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKey {
    EvenOrRound,
    OddOrAngular,
}

impl ResponseKey {
    /// Map a raw key symbol; anything but `q`/`p` (any case) is not a response.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim().to_ascii_lowercase().as_str() {
            "q" => Some(Self::EvenOrRound),
            "p" => Some(Self::OddOrAngular),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::EvenOrRound => 'q',
            Self::OddOrAngular => 'p',
        }
    }
}

/// Reaction-time weighted scoring for the dual-rule task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSwitchJudge {
    base: u32,
    floor: u32,
    divisor_ms: u32,
    wrong_penalty: u32,
    timeout_penalty: u32,
}

impl TaskSwitchJudge {
    pub fn new(config: &TaskSwitchingConfig) -> Self {
        Self {
            base: config.correct_base,
            floor: config.correct_floor,
            divisor_ms: config.reaction_divisor_ms.max(1),
            wrong_penalty: config.wrong_penalty,
            timeout_penalty: config.timeout_penalty,
        }
    }

    /// `max(floor, base - floor(rt_ms / divisor))`
    pub fn points_for(&self, reaction_time: Duration) -> u32 {
        let slowdown = reaction_time.as_millis() / u128::from(self.divisor_ms);
        let earned = u128::from(self.base).saturating_sub(slowdown);
        u32::try_from(earned).unwrap_or(self.base).max(self.floor)
    }
}

impl Default for TaskSwitchJudge {
    fn default() -> Self {
        Self::new(&TaskSwitchingConfig::default())
    }
}

impl Judge for TaskSwitchJudge {
    type Stimulus = TaskStimulus;
    type Response = ResponseKey;

    fn judge(&self, stimulus: &TaskStimulus, key: &ResponseKey, reaction_time: Duration) -> Verdict {
        if stimulus.expected_key() == *key {
            Verdict::correct(
                self.points_for(reaction_time),
                Some(reaction_time),
                StreakEffect::Extend,
            )
        } else {
            Verdict::incorrect(self.wrong_penalty, StreakEffect::Reset)
        }
    }

    fn timeout(&self, _stimulus: &TaskStimulus) -> Verdict {
        Verdict::timeout(self.timeout_penalty, StreakEffect::Reset)
    }
}
