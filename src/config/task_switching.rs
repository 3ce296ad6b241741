//! Task-switching game settings.

use crate::config::violations::{ensure, settle, ConfigError, ConfigViolation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the flat task-switching run.
///
/// Defaults reproduce the classic game: 30 trials, a 2.5 s response window
/// and a 300 ms feedback pause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSwitchingConfig {
    /// Trials per game (correct + incorrect + timeout)
    pub trial_count: u32,
    /// Time allowed to answer a trial
    pub response_window: Duration,
    /// Pause between an outcome and the next trial
    pub feedback_delay: Duration,
    /// Points for an instant correct answer
    pub correct_base: u32,
    /// Minimum points for any correct answer
    pub correct_floor: u32,
    /// Milliseconds of reaction time that cost one point
    pub reaction_divisor_ms: u32,
    /// Points lost for a wrong key
    pub wrong_penalty: u32,
    /// Points lost when the window runs out
    pub timeout_penalty: u32,
}

impl Default for TaskSwitchingConfig {
    fn default() -> Self {
        Self {
            trial_count: 30,
            response_window: Duration::from_millis(2500),
            feedback_delay: Duration::from_millis(300),
            correct_base: 100,
            correct_floor: 10,
            reaction_divisor_ms: 20,
            wrong_penalty: 5,
            timeout_penalty: 10,
        }
    }
}

impl TaskSwitchingConfig {
    pub fn builder() -> TaskSwitchingConfigBuilder {
        TaskSwitchingConfigBuilder::new()
    }

    /// Check every rule and report all violations together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        settle(vec![
            ensure(
                self.trial_count > 0,
                ConfigViolation::Zero {
                    field: "trial_count",
                },
            ),
            ensure(
                !self.response_window.is_zero(),
                ConfigViolation::EmptyWindow {
                    field: "response_window",
                    value: self.response_window,
                },
            ),
            ensure(
                self.reaction_divisor_ms > 0,
                ConfigViolation::Zero {
                    field: "reaction_divisor_ms",
                },
            ),
            ensure(
                self.correct_floor <= self.correct_base,
                ConfigViolation::FloorAboveBase {
                    floor: self.correct_floor,
                    base: self.correct_base,
                },
            ),
            ensure(
                self.timeout_penalty >= self.wrong_penalty,
                ConfigViolation::LenientTimeout {
                    timeout: self.timeout_penalty,
                    wrong: self.wrong_penalty,
                },
            ),
        ])
    }
}

/// Builder for [`TaskSwitchingConfig`], validated on `build()`.
#[derive(Debug, Clone, Default)]
pub struct TaskSwitchingConfigBuilder {
    config: TaskSwitchingConfig,
}

impl TaskSwitchingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trial_count(mut self, n: u32) -> Self {
        self.config.trial_count = n;
        self
    }

    pub fn response_window(mut self, window: Duration) -> Self {
        self.config.response_window = window;
        self
    }

    pub fn feedback_delay(mut self, delay: Duration) -> Self {
        self.config.feedback_delay = delay;
        self
    }

    /// Reward curve for correct answers: `max(floor, base - rt_ms / divisor_ms)`.
    pub fn reward(mut self, base: u32, floor: u32, divisor_ms: u32) -> Self {
        self.config.correct_base = base;
        self.config.correct_floor = floor;
        self.config.reaction_divisor_ms = divisor_ms;
        self
    }

    pub fn penalties(mut self, wrong: u32, timeout: u32) -> Self {
        self.config.wrong_penalty = wrong;
        self.config.timeout_penalty = timeout;
        self
    }

    pub fn build(self) -> Result<TaskSwitchingConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
