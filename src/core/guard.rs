//! Guard predicates for controlling phase transitions.
//!
//! Guards are pure boolean functions over the current phase. The phase
//! machine evaluates them before allowing a declared transition.

use super::state::State;
use std::fmt;
use std::sync::Arc;

/// Pure predicate that decides whether a transition may leave a phase.
///
/// # Example
///
/// ```rust
/// use mindgames::core::{Guard, State};
/// use serde::{Deserialize, Serialize};
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
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Over)
///     }
/// }
///
/// // Leaving for the menu is pointless when already there.
/// let away_from_menu = Guard::new(|s: &Screen| *s != Screen::Menu);
///
/// assert!(away_from_menu.check(&Screen::Playing));
/// assert!(away_from_menu.check(&Screen::Over));
/// assert!(!away_from_menu.check(&Screen::Menu));
/// ```
pub struct Guard<S: State> {
    predicate: Arc<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard allows leaving this phase.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl<S: State> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestPhase {
        Menu,
        Playing,
        Recall,
        Over,
    }

    impl State for TestPhase {
        fn name(&self) -> &str {
            match self {
                Self::Menu => "Menu",
                Self::Playing => "Playing",
                Self::Recall => "Recall",
                Self::Over => "Over",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Over)
        }

        fn accepts_input(&self) -> bool {
            matches!(self, Self::Playing | Self::Recall)
        }
    }

    #[test]
    fn guard_allows_matching_phases() {
        let guard = Guard::new(|s: &TestPhase| matches!(s, TestPhase::Menu));

        assert!(guard.check(&TestPhase::Menu));
        assert!(!guard.check(&TestPhase::Playing));
    }

    #[test]
    fn guard_can_test_phase_properties() {
        let guard = Guard::new(|s: &TestPhase| s.is_final() || *s == TestPhase::Menu);

        assert!(guard.check(&TestPhase::Menu));
        assert!(!guard.check(&TestPhase::Playing));
        assert!(!guard.check(&TestPhase::Recall));
        assert!(guard.check(&TestPhase::Over));
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard = Guard::new(|s: &TestPhase| s.accepts_input());
        let cloned = guard.clone();

        for phase in [
            TestPhase::Menu,
            TestPhase::Playing,
            TestPhase::Recall,
            TestPhase::Over,
        ] {
            assert_eq!(guard.check(&phase), cloned.check(&phase));
        }
    }
}
