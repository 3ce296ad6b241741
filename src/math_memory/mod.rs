//! Math + memory game.
//!
//! Memorize letters or words shown one at a time, solve a timed math
//! problem between items, then type the items back in order. Six levels
//! of five rounds each; three lives for the whole game.

mod engine;
mod items;
mod judge;
mod problems;
mod progression;

pub use engine::{GamePhase, MathMemoryEngine, MathMemoryInput, MathMemorySnapshot, Stage};
pub use items::{MemoryItemGenerator, MemorySequence, WORDS};
pub use judge::{tokenize, ArithmeticJudge, RecallJudge};
pub use problems::{MathProblem, Operator, ProblemGenerator};
pub use progression::{Progression, RoundDecision};
