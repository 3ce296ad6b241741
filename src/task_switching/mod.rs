//! Task-switching game.
//!
//! Each trial shows a digit and a shape in either the top or the bottom
//! box. The box decides the rule: top asks "even or odd?", bottom asks
//! "round or angular?". Thirty trials with a 2.5 second window each.

mod engine;
mod judge;
mod stimulus;

pub use engine::{TaskPhase, TaskSwitchInput, TaskSwitchSnapshot, TaskSwitchingEngine, TrialView};
pub use judge::{ResponseKey, TaskSwitchJudge};
pub use stimulus::{BoxSide, Shape, TaskStimulus, TaskSwitchGenerator, SHAPES};
