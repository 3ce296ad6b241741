//! Build errors for the phase machine builder.

use thiserror::Error;

/// Errors that can occur when building a phase machine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    #[error("Initial phase not specified. Call .initial(phase) before .build()")]
    MissingInitialState,

    #[error("No transitions declared. Add at least one with .allow(from, to)")]
    NoTransitions,
}
