//! Configuration violations and the error that carries them.

use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single rule a configuration broke.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field} must be non-zero (got {value:?})")]
    EmptyWindow { field: &'static str, value: Duration },

    #[error("timeout penalty ({timeout}) must be at least the wrong-answer penalty ({wrong})")]
    LenientTimeout { timeout: u32, wrong: u32 },

    #[error("correct-answer floor ({floor}) exceeds the base reward ({base})")]
    FloorAboveBase { floor: u32, base: u32 },

    #[error("at least one level must be configured")]
    NoLevels,

    #[error("level '{level}' has an inverted math range {min}..={max}")]
    InvertedRange { level: String, min: u32, max: u32 },

    #[error("level '{level}' must memorize at least one item")]
    EmptySequence { level: String },

    #[error("level '{level}' math range up to {max} overflows its answers")]
    AnswerOverflow { level: String, max: u32 },
}

/// Invalid configuration, with every violation found in one pass.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {}", join(.violations))]
    Invalid { violations: Vec<ConfigViolation> },
}

impl ConfigError {
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            Self::Invalid { violations } => violations,
        }
    }
}

fn join(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of one configuration rule.
pub(crate) type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

pub(crate) fn ensure(holds: bool, violation: ConfigViolation) -> Check {
    if holds {
        Validation::success(())
    } else {
        Validation::fail(violation)
    }
}

/// Fold every rule, accumulating ALL failures instead of stopping at the first.
pub(crate) fn settle(checks: Vec<Check>) -> Result<(), ConfigError> {
    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(ConfigError::Invalid {
            violations: errors.iter().cloned().collect(),
        }),
    }
}
