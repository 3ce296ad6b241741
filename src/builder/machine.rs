//! Builder for constructing phase machines.

use crate::builder::error::BuildError;
use crate::core::{Guard, State};
use crate::machine::{PhaseMachine, Transition};

/// Fluent builder for a [`PhaseMachine`] and its transition table.
pub struct PhaseMachineBuilder<S: State> {
    initial: Option<S>,
    transitions: Vec<Transition<S>>,
}

impl<S: State> PhaseMachineBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
        }
    }

    /// Set the initial phase (required).
    pub fn initial(mut self, phase: S) -> Self {
        self.initial = Some(phase);
        self
    }

    /// Allow an unconditional move.
    pub fn allow(mut self, from: S, to: S) -> Self {
        self.transitions.push(Transition::between(from, to));
        self
    }

    /// Allow a move from every phase the predicate accepts.
    pub fn allow_from_any<F>(mut self, to: S, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.transitions.push(Transition {
            from: None,
            to,
            guard: Some(Guard::new(predicate)),
        });
        self
    }

    /// Build the phase machine.
    pub fn build(self) -> Result<PhaseMachine<S>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let mut machine = PhaseMachine::new(initial);
        for transition in self.transitions {
            machine.add_transition(transition);
        }

        Ok(machine)
    }
}

impl<S: State> Default for PhaseMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
