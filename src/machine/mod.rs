//! Phase machine: the imperative shell around the pure phase core.
//!
//! # Key Concepts
//!
//! - **Transitions**: legal phase changes, optionally guarded
//! - **Phase Machine**: applies transitions and keeps the history
//!
//! Engines treat a rejected transition as a defect in their own sequencing,
//! never as something a player can trigger.

mod machine;
mod transition;

pub use machine::PhaseMachine;
pub use transition::{Transition, TransitionError};
