//! Stimulus generation.

use rand::Rng;
use std::fmt::Debug;

/// Produces the content of the next trial.
///
/// Generators hold only their difficulty parameters; randomness comes from
/// the caller so engines can be seeded in tests. Every draw is independent.
pub trait StimulusGenerator {
    type Stimulus: Clone + Debug;

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Stimulus;
}
