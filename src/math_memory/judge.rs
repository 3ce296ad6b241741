//! Scoring for math answers and sequence recall.

use crate::config::MathMemoryConfig;
use crate::math_memory::items::MemorySequence;
use crate::math_memory::problems::MathProblem;
use crate::trial::{Judge, StreakEffect, Verdict};
use std::time::Duration;

/// Exact integer comparison of a typed answer.
///
/// Math answers never touch the streak; the streak counts perfect recalls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArithmeticJudge {
    reward: u32,
    penalty: u32,
}

impl ArithmeticJudge {
    pub fn new(config: &MathMemoryConfig) -> Self {
        Self {
            reward: config.math_reward,
            penalty: config.math_penalty,
        }
    }
}

impl Default for ArithmeticJudge {
    fn default() -> Self {
        Self::new(&MathMemoryConfig::default())
    }
}

impl Judge for ArithmeticJudge {
    type Stimulus = MathProblem;
    type Response = str;

    fn judge(&self, problem: &MathProblem, answer: &str, reaction_time: Duration) -> Verdict {
        match answer.trim().parse::<i64>() {
            Ok(value) if value == i64::from(problem.answer) => {
                Verdict::correct(self.reward, Some(reaction_time), StreakEffect::Keep)
            }
            _ => Verdict::incorrect(self.penalty, StreakEffect::Keep),
        }
    }

    fn timeout(&self, _problem: &MathProblem) -> Verdict {
        Verdict::timeout(self.penalty, StreakEffect::Keep)
    }
}

/// Split recall input on whitespace and commas, uppercased, blanks dropped.
pub fn tokenize(input: &str) -> Vec<String> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::to_uppercase)
        .collect()
}

/// All-or-nothing positional recall check.
///
/// Recall is untimed, so this judge sits outside the [`Judge`] seam and
/// never produces a timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecallJudge {
    reward: u32,
}

impl RecallJudge {
    pub fn new(config: &MathMemoryConfig) -> Self {
        Self {
            reward: config.recall_reward,
        }
    }

    /// A failed recall costs a life rather than points.
    pub fn judge(&self, sequence: &MemorySequence, input: &str) -> Verdict {
        if sequence.matches(&tokenize(input)) {
            Verdict::correct(self.reward, None, StreakEffect::Extend)
        } else {
            Verdict::incorrect(0, StreakEffect::Reset)
        }
    }
}

impl Default for RecallJudge {
    fn default() -> Self {
        Self::new(&MathMemoryConfig::default())
    }
}
