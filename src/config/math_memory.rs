//! Math-memory game settings and the static level table.

use crate::config::violations::{ensure, settle, Check, ConfigError, ConfigViolation};
use crate::math_memory::ProblemGenerator;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::time::Duration;

/// Which arithmetic a level asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MathType {
    Addition,
    MixedBasic,
    Multiplication,
    All,
}

/// Which pool memory items are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Letters,
    Words,
    Mixed,
}

/// Immutable description of one difficulty tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: Cow<'static, str>,
    /// Items memorized per round
    pub sequence_length: usize,
    pub math_type: MathType,
    /// Inclusive operand range
    pub math_range: (u32, u32),
    pub item_type: ItemType,
    /// Time allowed per math problem
    pub math_time: Duration,
    /// How long each memory item stays on screen
    pub memory_time: Duration,
}

const fn level(
    name: &'static str,
    sequence_length: usize,
    math_type: MathType,
    math_range: (u32, u32),
    item_type: ItemType,
    math_time_ms: u64,
    memory_time_ms: u64,
) -> LevelConfig {
    LevelConfig {
        name: Cow::Borrowed(name),
        sequence_length,
        math_type,
        math_range,
        item_type,
        math_time: Duration::from_millis(math_time_ms),
        memory_time: Duration::from_millis(memory_time_ms),
    }
}

/// The six built-in levels, easiest first.
pub static LEVELS: [LevelConfig; 6] = [
    level("Beginner", 3, MathType::Addition, (1, 10), ItemType::Letters, 8000, 2000),
    level("Easy", 4, MathType::Addition, (5, 20), ItemType::Letters, 7000, 2000),
    level("Medium", 5, MathType::MixedBasic, (10, 30), ItemType::Letters, 6000, 1500),
    level("Hard", 6, MathType::MixedBasic, (10, 50), ItemType::Words, 6000, 2000),
    level("Expert", 7, MathType::Multiplication, (2, 12), ItemType::Words, 5000, 1500),
    level("Master", 8, MathType::All, (10, 100), ItemType::Mixed, 5000, 1500),
];

/// Settings for the nested memorize/compute/recall game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathMemoryConfig {
    /// Difficulty tiers; level `n` is `levels[n - 1]`
    pub levels: Vec<LevelConfig>,
    pub rounds_per_level: u32,
    /// Lives per game, shared by every level
    pub starting_lives: u32,
    /// Blank pause after a memory item disappears
    pub item_gap: Duration,
    /// Pause after a math answer before the next item
    pub answered_delay: Duration,
    /// Pause after a math timeout before the next item
    pub timeout_delay: Duration,
    /// How long recall feedback stays up
    pub recall_feedback_delay: Duration,
    pub math_reward: u32,
    pub math_penalty: u32,
    pub recall_reward: u32,
}

impl Default for MathMemoryConfig {
    fn default() -> Self {
        Self {
            levels: LEVELS.to_vec(),
            rounds_per_level: 5,
            starting_lives: 3,
            item_gap: Duration::from_millis(500),
            answered_delay: Duration::from_millis(500),
            timeout_delay: Duration::from_millis(1000),
            recall_feedback_delay: Duration::from_millis(2000),
            math_reward: 10,
            math_penalty: 5,
            recall_reward: 50,
        }
    }
}

impl MathMemoryConfig {
    pub fn builder() -> MathMemoryConfigBuilder {
        MathMemoryConfigBuilder::new()
    }

    /// Highest level number.
    pub fn max_level(&self) -> u8 {
        u8::try_from(self.levels.len()).unwrap_or(u8::MAX)
    }

    /// Settings for 1-based `level`.
    pub fn level(&self, level: u8) -> Option<&LevelConfig> {
        usize::from(level)
            .checked_sub(1)
            .and_then(|idx| self.levels.get(idx))
    }

    /// Check every rule and report all violations together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut checks: Vec<Check> = vec![
            ensure(!self.levels.is_empty(), ConfigViolation::NoLevels),
            ensure(
                self.rounds_per_level > 0,
                ConfigViolation::Zero {
                    field: "rounds_per_level",
                },
            ),
            ensure(
                self.starting_lives > 0,
                ConfigViolation::Zero {
                    field: "starting_lives",
                },
            ),
        ];

        for level in &self.levels {
            let (min, max) = level.math_range;
            checks.push(ensure(
                min <= max,
                ConfigViolation::InvertedRange {
                    level: level.name.to_string(),
                    min,
                    max,
                },
            ));
            checks.push(ensure(
                ProblemGenerator::for_level(level).largest_value().is_some(),
                ConfigViolation::AnswerOverflow {
                    level: level.name.to_string(),
                    max: min.max(max),
                },
            ));
            checks.push(ensure(
                level.sequence_length > 0,
                ConfigViolation::EmptySequence {
                    level: level.name.to_string(),
                },
            ));
            checks.push(ensure(
                !level.math_time.is_zero(),
                ConfigViolation::EmptyWindow {
                    field: "math_time",
                    value: level.math_time,
                },
            ));
        }

        settle(checks)
    }
}

/// Builder for [`MathMemoryConfig`], validated on `build()`.
#[derive(Debug, Clone, Default)]
pub struct MathMemoryConfigBuilder {
    config: MathMemoryConfig,
}

impl MathMemoryConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn levels(mut self, levels: Vec<LevelConfig>) -> Self {
        self.config.levels = levels;
        self
    }

    pub fn rounds_per_level(mut self, rounds: u32) -> Self {
        self.config.rounds_per_level = rounds;
        self
    }

    pub fn starting_lives(mut self, lives: u32) -> Self {
        self.config.starting_lives = lives;
        self
    }

    pub fn item_gap(mut self, gap: Duration) -> Self {
        self.config.item_gap = gap;
        self
    }

    /// Pauses after a math answer and after a math timeout.
    pub fn math_delays(mut self, answered: Duration, timed_out: Duration) -> Self {
        self.config.answered_delay = answered;
        self.config.timeout_delay = timed_out;
        self
    }

    pub fn recall_feedback_delay(mut self, delay: Duration) -> Self {
        self.config.recall_feedback_delay = delay;
        self
    }

    pub fn scoring(mut self, math_reward: u32, math_penalty: u32, recall_reward: u32) -> Self {
        self.config.math_reward = math_reward;
        self.config.math_penalty = math_penalty;
        self.config.recall_reward = recall_reward;
        self
    }

    pub fn build(self) -> Result<MathMemoryConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
