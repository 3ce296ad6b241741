//! Phase transition history.
//!
//! Each engine keeps an immutable log of the phases the current game went
//! through, stamped with wall-clock time, and exposes it read-only.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single phase change.
///
/// # Example
///
/// ```rust
/// use mindgames::core::{State, StateTransition};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Screen {
///     Menu,
///     Playing,
/// }
///
/// impl State for Screen {
///     fn name(&self) -> &str {
///         match self {
///             Self::Menu => "Menu",
///             Self::Playing => "Playing",
///         }
///     }
/// }
///
/// let transition = StateTransition {
///     from: Screen::Menu,
///     to: Screen::Playing,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, Screen::Playing);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The phase being left
    pub from: S,
    /// The phase being entered
    pub to: S,
    /// Wall-clock time of the change
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of phase transitions.
///
/// `record` returns a new history and leaves the original untouched.
///
/// # Example
///
/// ```rust
/// use mindgames::core::{State, StateHistory, StateTransition};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Screen {
///     Menu,
///     Playing,
///     Over,
/// }
///
/// impl State for Screen {
///     fn name(&self) -> &str {
///         match self {
///             Self::Menu => "Menu",
///             Self::Playing => "Playing",
///             Self::Over => "Over",
///         }
///     }
/// }
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: Screen::Menu,
///         to: Screen::Playing,
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: Screen::Playing,
///         to: Screen::Over,
///         timestamp: Utc::now(),
///     });
///
/// assert_eq!(history.get_path(), vec![&Screen::Menu, &Screen::Playing, &Screen::Over]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Phases traversed in order: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// All transitions in order.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}
