//! Running statistics and the end-of-game summary.

use crate::session::SessionId;
use crate::trial::{StreakEffect, Verdict};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Mutable accumulator owned by the active engine.
///
/// Derived values (accuracy, mean reaction time) are computed on demand and
/// never stored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunningStats {
    pub score: u64,
    pub streak: u32,
    pub best_streak: u32,
    pub lives: u32,
    pub total_trials: u32,
    pub correct_trials: u32,
    pub reaction_times: Vec<Duration>,
}

impl RunningStats {
    pub fn new(lives: u32) -> Self {
        Self {
            lives,
            ..Self::default()
        }
    }

    /// Clear everything for a new game.
    pub fn reset(&mut self, lives: u32) {
        *self = Self::new(lives);
    }

    /// Count a timed trial and apply its verdict.
    pub fn record_trial(&mut self, verdict: &Verdict) {
        self.total_trials += 1;
        if verdict.is_correct() {
            self.correct_trials += 1;
        }
        if let Some(rt) = verdict.reaction_time {
            self.reaction_times.push(rt);
        }
        self.apply(verdict);
    }

    /// Apply score and streak effects without counting a trial.
    pub fn apply(&mut self, verdict: &Verdict) {
        self.adjust_score(verdict.score_delta);
        match verdict.streak {
            StreakEffect::Extend => {
                self.streak += 1;
                self.best_streak = self.best_streak.max(self.streak);
            }
            StreakEffect::Reset => self.streak = 0,
            StreakEffect::Keep => {}
        }
    }

    /// Add a signed delta; the score floors at zero.
    pub fn adjust_score(&mut self, delta: i64) {
        self.score = if delta >= 0 {
            self.score.saturating_add(delta.unsigned_abs())
        } else {
            self.score.saturating_sub(delta.unsigned_abs())
        };
    }

    /// Take one life and return how many remain.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// `correct / total`, or 0 before any trial.
    pub fn accuracy(&self) -> f64 {
        if self.total_trials == 0 {
            0.0
        } else {
            f64::from(self.correct_trials) / f64::from(self.total_trials)
        }
    }

    /// Mean of recorded reaction times, or zero without samples.
    pub fn average_reaction_time(&self) -> Duration {
        let samples = u32::try_from(self.reaction_times.len()).unwrap_or(u32::MAX);
        if samples == 0 {
            return Duration::ZERO;
        }
        self.reaction_times.iter().sum::<Duration>() / samples
    }
}

/// How far a levelled game got.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub level: u8,
    pub level_name: String,
    pub round: u32,
    pub rounds_recalled: u32,
    pub won: bool,
}

/// End-of-game report handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session: SessionId,
    pub final_score: u64,
    pub total_trials: u32,
    pub correct_trials: u32,
    /// 0.0..=100.0
    pub accuracy_percent: f64,
    pub average_reaction_ms: u64,
    pub best_streak: u32,
    /// Present for the levelled game only
    pub progress: Option<Progress>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn from_stats(
        session: SessionId,
        stats: &RunningStats,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session,
            final_score: stats.score,
            total_trials: stats.total_trials,
            correct_trials: stats.correct_trials,
            accuracy_percent: stats.accuracy() * 100.0,
            average_reaction_ms: u64::try_from(stats.average_reaction_time().as_millis())
                .unwrap_or(u64::MAX),
            best_streak: stats.best_streak,
            progress: None,
            started_at,
            ended_at,
        }
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Game Over! Final Score: {} | Accuracy: ", self.final_score)?;
        if self.total_trials == 0 {
            f.write_str("0%")?;
        } else {
            write!(f, "{:.1}%", self.accuracy_percent)?;
        }
        write!(f, " | Avg Reaction: {}ms", self.average_reaction_ms)?;
        if let Some(progress) = &self.progress {
            write!(
                f,
                " | Level {} ({}) Round {}",
                progress.level, progress.level_name, progress.round
            )?;
        }
        Ok(())
    }
}
