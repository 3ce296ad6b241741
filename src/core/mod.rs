//! Core phase types.
//!
//! This module contains the pure functional core shared by both games:
//! - Phase definitions via the `State` trait
//! - Guard predicates for transition control
//! - Immutable phase history
//!
//! Nothing in here touches clocks, randomness or logging.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
