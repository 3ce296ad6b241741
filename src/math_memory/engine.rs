//! Levelled memorize/compute/recall game.

use crate::builder::PhaseMachineBuilder;
use crate::config::{LevelConfig, MathMemoryConfig, LEVELS};
use crate::core::{State, StateHistory};
use crate::driver::TimedGame;
use crate::error::EngineError;
use crate::machine::PhaseMachine;
use crate::math_memory::items::{MemoryItemGenerator, MemorySequence};
use crate::math_memory::judge::{ArithmeticJudge, RecallJudge};
use crate::math_memory::problems::{MathProblem, ProblemGenerator};
use crate::math_memory::progression::{Progression, RoundDecision};
use crate::session::{Feedback, SessionId};
use crate::state_enum;
use crate::stats::{Progress, RunningStats, SessionSummary};
use crate::timing::{Scheduler, TrialClock};
use crate::trial::{Outcome, Resolution, StimulusGenerator, TrialId, TrialRunner};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

state_enum! {
    #[serde(rename_all = "snake_case")]
    pub enum GamePhase {
        Menu,
        Playing,
        Recall,
        Feedback,
        GameOver,
    }
    final: [GameOver]
    input: [Playing, Recall]
}

impl GamePhase {
    /// Whether a game is under way (timers may be pending).
    pub fn in_game(self) -> bool {
        matches!(self, Self::Playing | Self::Recall | Self::Feedback)
    }
}

/// Where the current round is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Stage {
    /// No game running
    Idle,
    /// A memory item is on screen
    Memorize { item: String },
    /// Blank pause after an item disappears
    Gap,
    /// A math problem is waiting for an answer
    Compute { trial: TrialId, problem: MathProblem },
    /// Math answered or timed out; the next item is coming
    Answered,
    /// Waiting for the typed sequence
    AwaitRecall,
    /// Recall result on screen
    RecallFeedback { correct: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    HideItem,
    AfterGap,
    NextItem,
    Advance(RoundDecision),
}

/// Commands accepted by the runtime driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathMemoryInput {
    Start { level: u8 },
    Answer { trial: TrialId, text: String },
    Recall { text: String },
    Reset,
}

/// Read-only projection of the engine for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MathMemorySnapshot {
    pub session: SessionId,
    pub phase: GamePhase,
    pub stage: Stage,
    /// Item display or math countdown, in 100 ms steps
    pub time_left_ms: u64,
    pub level: u8,
    pub level_name: String,
    pub round: u32,
    pub rounds_per_level: u32,
    pub lives: u32,
    pub score: u64,
    pub streak: u32,
    pub math_correct: u32,
    pub math_total: u32,
    pub items_shown: usize,
    pub problems_shown: usize,
    pub sequence_length: usize,
    pub feedback: Option<Feedback>,
    pub summary: Option<SessionSummary>,
}

fn phase_machine() -> PhaseMachine<GamePhase> {
    PhaseMachineBuilder::new()
        .initial(GamePhase::Menu)
        .allow(GamePhase::Menu, GamePhase::Playing)
        .allow(GamePhase::GameOver, GamePhase::Playing)
        .allow(GamePhase::Playing, GamePhase::Recall)
        .allow(GamePhase::Recall, GamePhase::Feedback)
        .allow(GamePhase::Feedback, GamePhase::Playing)
        .allow(GamePhase::Feedback, GamePhase::GameOver)
        .allow_from_any(GamePhase::Menu, |phase| *phase != GamePhase::Menu)
        .build()
        .expect("math-memory phase table is static")
}

/// Math-interleaved sequential memory game.
///
/// A round shows `sequence_length` items one at a time with a math problem
/// after every item but the last, then asks for the items in order. Five
/// recalled rounds clear a level; a failed recall costs one of the lives
/// shared across the whole game.
#[derive(Debug)]
pub struct MathMemoryEngine<R = StdRng> {
    config: MathMemoryConfig,
    session: SessionId,
    phases: PhaseMachine<GamePhase>,
    level: LevelConfig,
    runner: TrialRunner<ProblemGenerator, ArithmeticJudge>,
    items: MemoryItemGenerator,
    recall: RecallJudge,
    scheduler: Scheduler<Deferred>,
    progression: Progression,
    sequence: MemorySequence,
    stage: Stage,
    item_clock: TrialClock,
    problems_shown: usize,
    stats: RunningStats,
    feedback: Option<Feedback>,
    summary: Option<SessionSummary>,
    started_at: DateTime<Utc>,
    rng: R,
}

impl MathMemoryEngine<StdRng> {
    pub fn new(config: MathMemoryConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl Default for MathMemoryEngine<StdRng> {
    fn default() -> Self {
        Self::new(MathMemoryConfig::default())
    }
}

impl<R: Rng> MathMemoryEngine<R> {
    pub fn with_rng(config: MathMemoryConfig, rng: R) -> Self {
        let level = config.level(1).unwrap_or(&LEVELS[0]).clone();
        let runner = TrialRunner::new(
            ProblemGenerator::for_level(&level),
            ArithmeticJudge::new(&config),
            level.math_time,
        );
        Self {
            session: SessionId::new(),
            phases: phase_machine(),
            items: MemoryItemGenerator::new(level.item_type),
            recall: RecallJudge::new(&config),
            scheduler: Scheduler::new(),
            progression: Progression::new(1, config.rounds_per_level, config.max_level()),
            sequence: MemorySequence::new(),
            stage: Stage::Idle,
            item_clock: TrialClock::new(),
            problems_shown: 0,
            stats: RunningStats::new(config.starting_lives),
            feedback: None,
            summary: None,
            started_at: Utc::now(),
            runner,
            level,
            config,
            rng,
        }
    }

    /// Start a game at `level` (1-based) and show the first item at `now`.
    ///
    /// Allowed from the menu and after a finished game. A configuration that
    /// was assembled by hand and fails validation is reported here.
    pub fn start_game(&mut self, level: u8, now: Instant) -> Result<SessionId, EngineError> {
        let phase = self.phase();
        if phase.in_game() {
            return Err(EngineError::AlreadyRunning {
                phase: phase.name().to_string(),
            });
        }
        self.config.validate()?;
        let config = self
            .config
            .level(level)
            .ok_or(EngineError::UnknownLevel {
                level,
                max: self.config.max_level(),
            })?
            .clone();

        self.clear_pending();
        self.session = SessionId::new();
        self.stats.reset(self.config.starting_lives);
        self.progression = Progression::new(
            level,
            self.config.rounds_per_level,
            self.config.max_level(),
        );
        self.feedback = None;
        self.summary = None;
        self.started_at = Utc::now();
        self.phases.clear_history();
        self.use_level(config);
        self.enter(GamePhase::Playing);

        info!(
            session = %self.session,
            level,
            name = %self.level.name,
            lives = self.stats.lives,
            "math-memory game started"
        );
        self.start_round(now);
        Ok(self.session)
    }

    /// Submit a typed math answer for `trial`.
    ///
    /// Blank input is ignored, as are stale or repeat submissions.
    /// Anything else that is not the exact answer is incorrect.
    pub fn submit_answer(&mut self, trial: TrialId, text: &str, now: Instant) -> Option<Outcome> {
        if self.phase() != GamePhase::Playing || text.trim().is_empty() {
            return None;
        }
        let resolution = self.runner.respond(trial, text, now)?;
        let outcome = resolution.verdict.outcome;
        self.settle_problem(resolution);
        self.drain(now);
        Some(outcome)
    }

    /// Submit the recalled sequence.
    ///
    /// Returns `None` outside the recall phase.
    pub fn submit_recall(&mut self, text: &str, now: Instant) -> Option<Outcome> {
        if self.phase() != GamePhase::Recall {
            return None;
        }

        let verdict = self.recall.judge(&self.sequence, text);
        self.stats.apply(&verdict);
        let recalled = verdict.is_correct();
        let message = if recalled {
            self.progression.record_recall();
            format!("✓ Perfect recall! +{}", verdict.score_delta)
        } else {
            self.stats.lose_life();
            format!("✗ The sequence was: {}", self.sequence.items().join(" "))
        };
        let decision = self.progression.decide(recalled, self.stats.lives);

        info!(
            session = %self.session,
            level = self.progression.level(),
            round = self.progression.round(),
            recalled,
            lives = self.stats.lives,
            ?decision,
            "recall judged"
        );

        self.feedback = Some(Feedback::new(verdict.outcome, message, verdict.score_delta));
        self.stage = Stage::RecallFeedback { correct: recalled };
        self.enter(GamePhase::Feedback);
        self.scheduler.schedule(
            now + self.config.recall_feedback_delay,
            Deferred::Advance(decision),
        );
        self.drain(now);
        Some(verdict.outcome)
    }

    /// Advance time: fire an expired math clock and any due step.
    ///
    /// Returns the outcomes produced by math timeouts, oldest first.
    pub fn poll(&mut self, now: Instant) -> Vec<Outcome> {
        self.drain(now)
    }

    /// Back to the menu with a fresh state.
    pub fn reset(&mut self) {
        self.clear_pending();
        self.stats.reset(self.config.starting_lives);
        self.progression = Progression::new(1, self.config.rounds_per_level, self.config.max_level());
        self.feedback = None;
        self.summary = None;
        if self.phase() != GamePhase::Menu {
            self.enter(GamePhase::Menu);
        }
        debug!(session = %self.session, "math-memory reset to menu");
    }

    /// Leave the game screen: drop the problem, its clock and every pending step.
    pub fn navigate_away(&mut self) {
        let dropped = self.scheduler.len();
        self.clear_pending();
        if self.phase() != GamePhase::Menu {
            self.enter(GamePhase::Menu);
        }
        debug!(session = %self.session, dropped, "math-memory session abandoned");
    }

    /// Next instant at which [`Self::poll`] has work to do.
    pub fn next_wake(&self) -> Option<Instant> {
        if !self.phase().in_game() {
            return None;
        }
        match (self.runner.deadline(), self.scheduler.next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn snapshot(&self, now: Instant) -> MathMemorySnapshot {
        MathMemorySnapshot {
            session: self.session,
            phase: self.phase(),
            stage: self.stage.clone(),
            time_left_ms: u64::try_from(self.time_left(now).as_millis()).unwrap_or(u64::MAX),
            level: self.progression.level(),
            level_name: self.level.name.to_string(),
            round: self.progression.round(),
            rounds_per_level: self.progression.rounds_per_level(),
            lives: self.stats.lives,
            score: self.stats.score,
            streak: self.stats.streak,
            math_correct: self.stats.correct_trials,
            math_total: self.stats.total_trials,
            items_shown: self.sequence.len(),
            problems_shown: self.problems_shown,
            sequence_length: self.level.sequence_length,
            feedback: self.feedback.clone(),
            summary: self.summary.clone(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        *self.phases.current()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn history(&self) -> &StateHistory<GamePhase> {
        self.phases.history()
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn sequence(&self) -> &MemorySequence {
        &self.sequence
    }

    /// The math problem on screen, if one is awaiting an answer.
    pub fn current_problem(&self) -> Option<(TrialId, &MathProblem)> {
        self.runner
            .current()
            .filter(|trial| !trial.responded)
            .map(|trial| (trial.id, &trial.stimulus))
    }

    pub fn stats(&self) -> &RunningStats {
        &self.stats
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn config(&self) -> &MathMemoryConfig {
        &self.config
    }

    fn time_left(&self, now: Instant) -> Duration {
        match self.stage {
            Stage::Compute { .. } => self.runner.display_time_left(now),
            Stage::Memorize { .. } => self.item_clock.display_time_left(now),
            _ => Duration::ZERO,
        }
    }

    fn drain(&mut self, now: Instant) -> Vec<Outcome> {
        let mut timeouts = Vec::new();
        while self.phase().in_game() {
            if let Some(resolution) = self.runner.poll(now) {
                timeouts.push(resolution.verdict.outcome);
                self.settle_problem(resolution);
                continue;
            }
            match self.scheduler.pop_due(now) {
                Some((due, action)) => self.run(action, due),
                None => break,
            }
        }
        timeouts
    }

    fn run(&mut self, action: Deferred, at: Instant) {
        match action {
            Deferred::HideItem => self.hide_item(at),
            Deferred::AfterGap => self.after_gap(at),
            Deferred::NextItem => self.show_item(at),
            Deferred::Advance(decision) => self.advance(decision, at),
        }
    }

    fn use_level(&mut self, level: LevelConfig) {
        self.runner
            .reconfigure(ProblemGenerator::for_level(&level), level.math_time);
        self.items = MemoryItemGenerator::new(level.item_type);
        self.level = level;
    }

    fn start_round(&mut self, at: Instant) {
        self.sequence.clear();
        self.problems_shown = 0;
        self.feedback = None;
        debug!(
            session = %self.session,
            level = self.progression.level(),
            round = self.progression.round(),
            "round started"
        );
        self.show_item(at);
    }

    fn show_item(&mut self, at: Instant) {
        let item = self.items.generate(&mut self.rng);
        debug!(session = %self.session, %item, position = self.sequence.len() + 1, "item shown");
        self.stage = Stage::Memorize { item };
        self.item_clock.disarm();
        self.item_clock.arm(self.level.memory_time, at);
        self.scheduler
            .schedule(at + self.level.memory_time, Deferred::HideItem);
    }

    fn hide_item(&mut self, at: Instant) {
        match std::mem::replace(&mut self.stage, Stage::Gap) {
            Stage::Memorize { item } => self.sequence.push(item),
            other => {
                debug_assert!(false, "item hidden during {other:?}");
                error!(session = %self.session, stage = ?other, "item hidden outside memorize");
            }
        }
        self.item_clock.disarm();
        self.scheduler
            .schedule(at + self.config.item_gap, Deferred::AfterGap);
    }

    fn after_gap(&mut self, at: Instant) {
        if self.sequence.len() < self.level.sequence_length {
            let trial = self.runner.begin(&mut self.rng, at);
            let (id, problem) = (trial.id, trial.stimulus);
            self.problems_shown += 1;
            self.feedback = None;
            debug!(session = %self.session, trial = %id, %problem, "problem shown");
            self.stage = Stage::Compute { trial: id, problem };
        } else {
            self.stage = Stage::AwaitRecall;
            self.enter(GamePhase::Recall);
            debug!(session = %self.session, items = self.sequence.len(), "recall requested");
        }
    }

    fn settle_problem(&mut self, resolution: Resolution<MathProblem>) {
        let Resolution {
            trial,
            stimulus,
            verdict,
            resolved_at,
        } = resolution;

        self.stats.record_trial(&verdict);
        let (message, delay) = match verdict.outcome {
            Outcome::Correct => ("✓ Correct!".to_string(), self.config.answered_delay),
            Outcome::Incorrect => (
                format!("✗ Wrong! Answer: {}", stimulus.answer),
                self.config.answered_delay,
            ),
            Outcome::Timeout => (
                format!("✗ Time's up! Answer: {}", stimulus.answer),
                self.config.timeout_delay,
            ),
        };
        debug!(
            session = %self.session,
            trial = %trial,
            outcome = ?verdict.outcome,
            delta = verdict.score_delta,
            score = self.stats.score,
            "problem resolved"
        );

        self.feedback = Some(Feedback::new(verdict.outcome, message, verdict.score_delta));
        self.stage = Stage::Answered;
        self.scheduler.schedule(resolved_at + delay, Deferred::NextItem);
    }

    fn advance(&mut self, decision: RoundDecision, at: Instant) {
        self.progression.apply(decision);
        match decision {
            RoundDecision::NextRound | RoundDecision::Retry => {
                self.enter(GamePhase::Playing);
                self.start_round(at);
            }
            RoundDecision::LevelUp => {
                let level = self.progression.level();
                match self.config.level(level).cloned() {
                    Some(config) => {
                        info!(session = %self.session, level, name = %config.name, "level up");
                        self.use_level(config);
                        self.enter(GamePhase::Playing);
                        self.start_round(at);
                    }
                    None => {
                        warn!(session = %self.session, level, "no such level; ending game");
                        self.finish(true);
                    }
                }
            }
            RoundDecision::Victory => self.finish(true),
            RoundDecision::GameOver => self.finish(false),
        }
    }

    fn finish(&mut self, won: bool) {
        self.clear_pending();
        self.enter(GamePhase::GameOver);

        let progress = Progress {
            level: self.progression.level(),
            level_name: self.level.name.to_string(),
            round: self.progression.round(),
            rounds_recalled: self.progression.rounds_recalled(),
            won,
        };
        let summary =
            SessionSummary::from_stats(self.session, &self.stats, self.started_at, Utc::now())
                .with_progress(progress);
        info!(session = %self.session, won, %summary, "math-memory game ended");
        self.summary = Some(summary);
    }

    fn clear_pending(&mut self) {
        self.scheduler.cancel_all();
        self.runner.abandon();
        self.stage = Stage::Idle;
        self.item_clock.disarm();
        self.sequence.clear();
        self.problems_shown = 0;
    }

    fn enter(&mut self, phase: GamePhase) {
        let result = self.phases.transition(phase);
        debug_assert!(result.is_ok(), "{result:?}");
        if let Err(err) = result {
            error!(session = %self.session, %err, "illegal phase change");
        }
    }
}

impl<R: Rng> TimedGame for MathMemoryEngine<R> {
    type Input = MathMemoryInput;
    type Snapshot = MathMemorySnapshot;

    fn handle(&mut self, input: MathMemoryInput, now: Instant) {
        match input {
            MathMemoryInput::Start { level } => {
                if let Err(err) = self.start_game(level, now) {
                    warn!(%err, "start ignored");
                }
            }
            MathMemoryInput::Answer { trial, text } => {
                self.submit_answer(trial, &text, now);
            }
            MathMemoryInput::Recall { text } => {
                self.submit_recall(&text, now);
            }
            MathMemoryInput::Reset => self.reset(),
        }
    }

    fn poll(&mut self, now: Instant) {
        self.drain(now);
    }

    fn next_wake(&self) -> Option<Instant> {
        MathMemoryEngine::next_wake(self)
    }

    fn navigate_away(&mut self) {
        MathMemoryEngine::navigate_away(self);
    }

    fn snapshot(&self, now: Instant) -> MathMemorySnapshot {
        MathMemoryEngine::snapshot(self, now)
    }
}
