//! Core State trait for game phases.
//!
//! Every game engine tracks a coarse phase (menu, playing, game over, ...)
//! that decides which operations are legal. Phases implement this trait so
//! the phase machine and history can stay generic.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for game phases.
///
/// All methods are pure. A phase is a plain value describing where a
/// session currently is; it never owns trial data.
///
/// # Required Traits
///
/// - `Clone`: phases are copied into the transition history
/// - `PartialEq`: transitions are matched by comparing phases
/// - `Debug`: phases show up in logs and assertion messages
/// - `Serialize` + `Deserialize`: phases are part of rendered snapshots
///
/// # Example
///
/// ```rust
/// use mindgames::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum DrillPhase {
///     Waiting,
///     Answering,
///     Done,
/// }
///
/// impl State for DrillPhase {
///     fn name(&self) -> &str {
///         match self {
///             Self::Waiting => "Waiting",
///             Self::Answering => "Answering",
///             Self::Done => "Done",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Done)
///     }
///
///     fn accepts_input(&self) -> bool {
///         matches!(self, Self::Answering)
///     }
/// }
///
/// assert!(DrillPhase::Answering.accepts_input());
/// assert!(!DrillPhase::Waiting.accepts_input());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name of the phase for logs and snapshots.
    fn name(&self) -> &str;

    /// Whether the game is over in this phase.
    ///
    /// A final phase keeps its summary readable until the next game starts.
    fn is_final(&self) -> bool {
        false
    }

    /// Whether user responses are routed to the engine in this phase.
    ///
    /// Responses arriving in any other phase are dropped without effect.
    fn accepts_input(&self) -> bool {
        false
    }
}
