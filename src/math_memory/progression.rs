//! Round and level progression.

use serde::{Deserialize, Serialize};

/// What happens once recall feedback has been shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundDecision {
    /// Recalled; play the next round of this level
    NextRound,
    /// Recalled the last round; move to round 1 of the next level
    LevelUp,
    /// Failed with lives left; replay the same round
    Retry,
    /// Recalled the last round of the last level
    Victory,
    /// Failed with no lives left
    GameOver,
}

/// Position within the level ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    level: u8,
    round: u32,
    rounds_per_level: u32,
    max_level: u8,
    rounds_recalled: u32,
}

impl Progression {
    pub fn new(start_level: u8, rounds_per_level: u32, max_level: u8) -> Self {
        Self {
            level: start_level,
            round: 1,
            rounds_per_level,
            max_level,
            rounds_recalled: 0,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn rounds_per_level(&self) -> u32 {
        self.rounds_per_level
    }

    pub fn rounds_recalled(&self) -> u32 {
        self.rounds_recalled
    }

    /// Decide the next step after a recall attempt (pure).
    pub fn decide(&self, recalled: bool, lives_left: u32) -> RoundDecision {
        match (recalled, lives_left) {
            (true, _) if self.round < self.rounds_per_level => RoundDecision::NextRound,
            (true, _) if self.level < self.max_level => RoundDecision::LevelUp,
            (true, _) => RoundDecision::Victory,
            (false, 0) => RoundDecision::GameOver,
            (false, _) => RoundDecision::Retry,
        }
    }

    pub fn record_recall(&mut self) {
        self.rounds_recalled += 1;
    }

    /// Move to wherever `decision` points. Terminal decisions leave the
    /// position where the game ended.
    pub fn apply(&mut self, decision: RoundDecision) {
        match decision {
            RoundDecision::NextRound => self.round += 1,
            RoundDecision::LevelUp => {
                self.level += 1;
                self.round = 1;
            }
            RoundDecision::Retry | RoundDecision::Victory | RoundDecision::GameOver => {}
        }
    }
}
