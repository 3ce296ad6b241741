//! Errors returned to callers of the engines.
//!
//! Wrong answers are never errors; these cover requests that make no sense
//! for the engine's current phase or configuration.

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("Unknown level {level}; levels run from 1 to {max}")]
    UnknownLevel { level: u8, max: u8 },

    #[error("A game is already in progress (phase '{phase}')")]
    AlreadyRunning { phase: String },
}
