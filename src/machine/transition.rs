//! Declared phase transitions.

use crate::core::{Guard, State};

/// Errors raised when an engine asks for a phase change it never declared.
///
/// These are programmer defects, not user mistakes: engines assert on them
/// in debug builds and log them in release builds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("No transition declared from '{from}' to '{to}'")]
    NotDeclared { from: String, to: String },

    #[error("Guard blocked transition from '{from}' to '{to}'")]
    GuardBlocked { from: String, to: String },
}

/// A legal move between two phases.
///
/// `from: None` matches any phase; pair it with a guard to exclude the
/// phases the move makes no sense from.
#[derive(Debug)]
pub struct Transition<S: State> {
    pub from: Option<S>,
    pub to: S,
    pub guard: Option<Guard<S>>,
}

impl<S: State> Transition<S> {
    /// Unconditional transition between two phases.
    pub fn between(from: S, to: S) -> Self {
        Self {
            from: Some(from),
            to,
            guard: None,
        }
    }

    /// Whether this declaration covers the move `current -> target`,
    /// ignoring the guard.
    pub fn matches(&self, current: &S, target: &S) -> bool {
        *target == self.to && self.from.as_ref().map_or(true, |from| from == current)
    }

    /// Whether the move `current -> target` may execute (pure).
    pub fn can_execute(&self, current: &S, target: &S) -> bool {
        self.matches(current, target) && self.guard.as_ref().map_or(true, |g| g.check(current))
    }
}

impl<S: State> Clone for Transition<S> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            guard: self.guard.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestPhase {
        Idle,
        Running,
        Ended,
    }

    impl State for TestPhase {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Running => "Running",
                Self::Ended => "Ended",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Ended)
        }
    }

    #[test]
    fn between_matches_only_its_endpoints() {
        let transition = Transition::between(TestPhase::Idle, TestPhase::Running);

        assert!(transition.can_execute(&TestPhase::Idle, &TestPhase::Running));
        assert!(!transition.can_execute(&TestPhase::Running, &TestPhase::Running));
        assert!(!transition.can_execute(&TestPhase::Idle, &TestPhase::Ended));
    }

    #[test]
    fn wildcard_source_respects_guard() {
        let transition = Transition {
            from: None,
            to: TestPhase::Idle,
            guard: Some(Guard::new(|s: &TestPhase| *s != TestPhase::Idle)),
        };

        assert!(transition.can_execute(&TestPhase::Running, &TestPhase::Idle));
        assert!(transition.can_execute(&TestPhase::Ended, &TestPhase::Idle));
        assert!(transition.matches(&TestPhase::Idle, &TestPhase::Idle));
        assert!(!transition.can_execute(&TestPhase::Idle, &TestPhase::Idle));
    }
}
