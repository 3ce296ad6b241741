//! Mindgames: timed trial engines for cognitive-training mini-games
//!
//! Two games share one engine design:
//!
//! - **Task switching**: a digit and a shape appear in the top or bottom
//!   box; the box picks the rule (parity or roundness). 30 trials, 2.5 s each.
//! - **Math + memory**: memorize items shown one at a time, solve a timed
//!   problem between them, then recall the items in order. Six levels.
//!
//! The engines are a pure core. Every operation takes the current
//! [`Instant`](std::time::Instant), deferred steps are plain data in a
//! [`Scheduler`](timing::Scheduler), and the race between a response and a
//! timeout is settled inside [`TrialRunner`](trial::TrialRunner) so exactly
//! one of them wins. The tokio [`driver`] is the imperative shell that runs
//! an engine against real time.
//!
//! # Core Concepts
//!
//! - **Phases**: each game's coarse state implements [`State`] and moves
//!   through a declared [`PhaseMachine`](machine::PhaseMachine)
//! - **Trials**: a [`StimulusGenerator`](trial::StimulusGenerator) makes the
//!   content and a [`Judge`](trial::Judge) scores the response
//! - **Stats**: [`RunningStats`](stats::RunningStats) accumulate during a
//!   game and become a [`SessionSummary`](stats::SessionSummary) at the end
//!
//! # Example
//!
//! ```rust
//! use mindgames::task_switching::{TaskPhase, TaskSwitchingEngine};
//! use mindgames::config::TaskSwitchingConfig;
//! use std::time::{Duration, Instant};
//!
//! let mut engine = TaskSwitchingEngine::new(TaskSwitchingConfig::default());
//! let t0 = Instant::now();
//! engine.start(t0).unwrap();
//!
//! let trial = engine.current_trial().unwrap();
//! let (id, key) = (trial.id, trial.stimulus.expected_key());
//! engine.respond(id, &key.symbol().to_string(), t0 + Duration::from_millis(420));
//!
//! assert_eq!(engine.stats().correct_trials, 1);
//! assert_eq!(engine.phase(), TaskPhase::Running);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod machine;
pub mod math_memory;
pub mod session;
pub mod stats;
pub mod task_switching;
pub mod timing;
pub mod trial;

// Re-export commonly used types
pub use crate::core::{Guard, State, StateHistory, StateTransition};
pub use error::EngineError;
pub use math_memory::MathMemoryEngine;
pub use session::{Feedback, SessionId};
pub use stats::{RunningStats, SessionSummary};
pub use task_switching::TaskSwitchingEngine;
pub use trial::{Outcome, TrialId};
