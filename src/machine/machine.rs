//! Phase machine that enforces declared transitions and records history.

use crate::core::{State, StateHistory, StateTransition};
use crate::machine::transition::{Transition, TransitionError};
use chrono::Utc;

/// Tracks the current phase of a game and the path it took to get there.
///
/// Every move must match a declared [`Transition`]; the engines build their
/// table once through [`crate::builder::PhaseMachineBuilder`].
#[derive(Debug, Clone)]
pub struct PhaseMachine<S: State> {
    current: S,
    transitions: Vec<Transition<S>>,
    history: StateHistory<S>,
}

impl<S: State> PhaseMachine<S> {
    /// Create a machine resting in `initial` with no declared moves.
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            transitions: Vec::new(),
            history: StateHistory::new(),
        }
    }

    /// Declare an additional legal move.
    pub fn add_transition(&mut self, transition: Transition<S>) {
        self.transitions.push(transition);
    }

    /// Current phase (pure).
    pub fn current(&self) -> &S {
        &self.current
    }

    /// Phase history so far (pure).
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Move to `target`, recording the change.
    pub fn transition(&mut self, target: S) -> Result<&S, TransitionError> {
        let declared: Vec<&Transition<S>> = self
            .transitions
            .iter()
            .filter(|t| t.matches(&self.current, &target))
            .collect();

        if declared.is_empty() {
            return Err(TransitionError::NotDeclared {
                from: self.current.name().to_string(),
                to: target.name().to_string(),
            });
        }

        if !declared.iter().any(|t| t.can_execute(&self.current, &target)) {
            return Err(TransitionError::GuardBlocked {
                from: self.current.name().to_string(),
                to: target.name().to_string(),
            });
        }

        self.history = self.history.record(StateTransition {
            from: self.current.clone(),
            to: target.clone(),
            timestamp: Utc::now(),
        });
        self.current = target;
        Ok(&self.current)
    }

    /// Start a fresh history without touching the declared table.
    ///
    /// The current phase is kept; engines call this when a new game begins.
    pub fn clear_history(&mut self) {
        self.history = StateHistory::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Guard;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestPhase {
        Menu,
        Playing,
        Over,
    }

    impl State for TestPhase {
        fn name(&self) -> &str {
            match self {
                Self::Menu => "Menu",
                Self::Playing => "Playing",
                Self::Over => "Over",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Over)
        }
    }

    fn machine() -> PhaseMachine<TestPhase> {
        let mut machine = PhaseMachine::new(TestPhase::Menu);
        machine.add_transition(Transition::between(TestPhase::Menu, TestPhase::Playing));
        machine.add_transition(Transition::between(TestPhase::Playing, TestPhase::Over));
        machine.add_transition(Transition {
            from: None,
            to: TestPhase::Menu,
            guard: Some(Guard::new(|s: &TestPhase| *s != TestPhase::Menu)),
        });
        machine
    }

    #[test]
    fn declared_moves_succeed_and_are_recorded() {
        let mut machine = machine();

        machine.transition(TestPhase::Playing).unwrap();
        machine.transition(TestPhase::Over).unwrap();

        assert!(machine.current().is_final());
        assert_eq!(
            machine.history().get_path(),
            vec![&TestPhase::Menu, &TestPhase::Playing, &TestPhase::Over]
        );
    }

    #[test]
    fn undeclared_move_is_rejected() {
        let mut machine = machine();

        let result = machine.transition(TestPhase::Over);

        assert_eq!(
            result.unwrap_err(),
            TransitionError::NotDeclared {
                from: "Menu".to_string(),
                to: "Over".to_string(),
            }
        );
        assert_eq!(machine.current(), &TestPhase::Menu);
        assert!(machine.history().transitions().is_empty());
    }

    #[test]
    fn guard_blocks_wildcard_move() {
        let mut machine = machine();

        assert!(matches!(
            machine.transition(TestPhase::Menu),
            Err(TransitionError::GuardBlocked { .. })
        ));

        machine.transition(TestPhase::Playing).unwrap();
        machine.transition(TestPhase::Menu).unwrap();
        assert_eq!(machine.current(), &TestPhase::Menu);
    }

    #[test]
    fn clear_history_keeps_current_phase() {
        let mut machine = machine();
        machine.transition(TestPhase::Playing).unwrap();

        machine.clear_history();

        assert_eq!(machine.current(), &TestPhase::Playing);
        assert!(machine.history().transitions().is_empty());
    }
}
