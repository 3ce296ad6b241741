//! Builder API for phase machines.
//!
//! Fluent builders and the `state_enum!` macro keep the per-game phase
//! tables short while staying type-checked.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::PhaseMachineBuilder;
