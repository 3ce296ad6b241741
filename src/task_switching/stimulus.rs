//! Task-switching stimuli: which box is active, the digit and the shape.

use crate::task_switching::judge::ResponseKey;
use crate::trial::StimulusGenerator;
use rand::Rng;
use serde::Serialize;

/// Which box holds the stimulus, and therefore which rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxSide {
    /// Parity rule: even or odd digit
    Top,
    /// Shape rule: round or angular outline
    Bottom,
}

/// Catalog entry for a stimulus outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    pub name: &'static str,
    pub is_round: bool,
}

/// Every shape a trial can show.
pub const SHAPES: [Shape; 7] = [
    Shape { name: "circle", is_round: true },
    Shape { name: "square", is_round: false },
    Shape { name: "triangle", is_round: false },
    Shape { name: "hexagon", is_round: false },
    Shape { name: "heart", is_round: true },
    Shape { name: "star", is_round: false },
    Shape { name: "octagon", is_round: true },
];

/// Content of one task-switching trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskStimulus {
    pub side: BoxSide,
    /// 1..=9
    pub digit: u8,
    pub shape: Shape,
}

impl TaskStimulus {
    /// Key the active rule asks for.
    pub fn expected_key(&self) -> ResponseKey {
        let first = match self.side {
            BoxSide::Top => self.digit % 2 == 0,
            BoxSide::Bottom => self.shape.is_round,
        };
        if first {
            ResponseKey::EvenOrRound
        } else {
            ResponseKey::OddOrAngular
        }
    }
}

/// Uniform draws over side, digit and shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskSwitchGenerator;

impl StimulusGenerator for TaskSwitchGenerator {
    type Stimulus = TaskStimulus;

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> TaskStimulus {
        let side = if rng.gen_bool(0.5) {
            BoxSide::Top
        } else {
            BoxSide::Bottom
        };
        TaskStimulus {
            side,
            digit: rng.gen_range(1..=9),
            shape: SHAPES[rng.gen_range(0..SHAPES.len())],
        }
    }
}
