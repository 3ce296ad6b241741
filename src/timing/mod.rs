//! Time handling: per-trial countdowns and deferred engine actions.
//!
//! Both pieces are passive. They never read the system clock; callers pass
//! `now` in, which keeps engines deterministic under test and lets the
//! runtime driver decide what "now" means.

mod clock;
mod scheduler;

pub use clock::{TrialClock, DISPLAY_TICK};
pub use scheduler::Scheduler;
