//! Flat 30-trial task-switching game.

use crate::builder::PhaseMachineBuilder;
use crate::config::TaskSwitchingConfig;
use crate::core::{State, StateHistory};
use crate::driver::TimedGame;
use crate::error::EngineError;
use crate::machine::PhaseMachine;
use crate::session::{Feedback, SessionId};
use crate::state_enum;
use crate::stats::{RunningStats, SessionSummary};
use crate::task_switching::judge::{ResponseKey, TaskSwitchJudge};
use crate::task_switching::stimulus::{TaskStimulus, TaskSwitchGenerator};
use crate::timing::Scheduler;
use crate::trial::{ActiveTrial, Outcome, Resolution, TrialId, TrialRunner};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, error, info, warn};

state_enum! {
    #[serde(rename_all = "snake_case")]
    pub enum TaskPhase {
        Idle,
        Running,
        Ended,
    }
    final: [Ended]
    input: [Running]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    NextTrial,
}

/// Commands accepted by the runtime driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSwitchInput {
    Start,
    Respond { trial: TrialId, symbol: String },
    End,
}

/// What the renderer needs to draw the current trial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialView {
    pub id: TrialId,
    #[serde(flatten)]
    pub stimulus: TaskStimulus,
    pub awaiting_response: bool,
}

/// Read-only projection of the engine for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSwitchSnapshot {
    pub session: SessionId,
    pub phase: TaskPhase,
    pub trial: Option<TrialView>,
    pub time_left_ms: u64,
    pub score: u64,
    pub streak: u32,
    pub trials_completed: u32,
    pub trial_count: u32,
    pub feedback: Option<Feedback>,
    pub summary: Option<SessionSummary>,
}

fn phase_machine() -> PhaseMachine<TaskPhase> {
    PhaseMachineBuilder::new()
        .initial(TaskPhase::Idle)
        .allow(TaskPhase::Idle, TaskPhase::Running)
        .allow(TaskPhase::Ended, TaskPhase::Running)
        .allow(TaskPhase::Running, TaskPhase::Ended)
        .allow_from_any(TaskPhase::Idle, |phase| *phase != TaskPhase::Idle)
        .build()
        .expect("task-switching phase table is static")
}

/// Dual-rule task-switching game.
///
/// The top box asks for the digit's parity, the bottom box for the shape's
/// roundness. Each trial is answered, answered wrongly or timed out; after
/// a short feedback pause the next trial appears until the configured
/// count is reached.
#[derive(Debug)]
pub struct TaskSwitchingEngine<R = StdRng> {
    config: TaskSwitchingConfig,
    session: SessionId,
    phases: PhaseMachine<TaskPhase>,
    runner: TrialRunner<TaskSwitchGenerator, TaskSwitchJudge>,
    scheduler: Scheduler<Deferred>,
    stats: RunningStats,
    feedback: Option<Feedback>,
    summary: Option<SessionSummary>,
    started_at: DateTime<Utc>,
    rng: R,
}

impl TaskSwitchingEngine<StdRng> {
    pub fn new(config: TaskSwitchingConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl Default for TaskSwitchingEngine<StdRng> {
    fn default() -> Self {
        Self::new(TaskSwitchingConfig::default())
    }
}

impl<R: Rng> TaskSwitchingEngine<R> {
    pub fn with_rng(config: TaskSwitchingConfig, rng: R) -> Self {
        let runner = TrialRunner::new(
            TaskSwitchGenerator,
            TaskSwitchJudge::new(&config),
            config.response_window,
        );
        Self {
            config,
            session: SessionId::new(),
            phases: phase_machine(),
            runner,
            scheduler: Scheduler::new(),
            stats: RunningStats::default(),
            feedback: None,
            summary: None,
            started_at: Utc::now(),
            rng,
        }
    }

    /// Start a new game and present its first trial at `now`.
    pub fn start(&mut self, now: Instant) -> Result<SessionId, EngineError> {
        let phase = self.phase();
        if phase == TaskPhase::Running {
            return Err(EngineError::AlreadyRunning {
                phase: phase.name().to_string(),
            });
        }

        self.scheduler.cancel_all();
        self.runner.abandon();
        self.session = SessionId::new();
        self.stats.reset(0);
        self.feedback = None;
        self.summary = None;
        self.started_at = Utc::now();
        self.phases.clear_history();
        self.enter(TaskPhase::Running);

        info!(
            session = %self.session,
            trials = self.config.trial_count,
            "task-switching game started"
        );
        self.present(now);
        Ok(self.session)
    }

    /// Deliver a key press for `trial`.
    ///
    /// Unknown symbols, stale trial ids and repeat presses are ignored and
    /// return `None`.
    pub fn respond(&mut self, trial: TrialId, symbol: &str, now: Instant) -> Option<Outcome> {
        if !self.phase().accepts_input() {
            return None;
        }
        let key = ResponseKey::from_symbol(symbol)?;
        let resolution = self.runner.respond(trial, &key, now)?;
        let outcome = resolution.verdict.outcome;
        self.settle(resolution);
        self.drain(now);
        Some(outcome)
    }

    /// Advance time: fire an expired clock and any due feedback pause.
    ///
    /// Returns the outcomes produced by timeouts, oldest first.
    pub fn poll(&mut self, now: Instant) -> Vec<Outcome> {
        self.drain(now)
    }

    /// End the game early and report the summary.
    pub fn end(&mut self) -> Option<&SessionSummary> {
        if self.phase() == TaskPhase::Running {
            self.finish();
        }
        self.summary.as_ref()
    }

    /// Leave the game screen: drop the trial, its clock and every pending pause.
    pub fn navigate_away(&mut self) {
        let dropped = self.scheduler.cancel_all();
        self.runner.abandon();
        self.feedback = None;
        if self.phase() != TaskPhase::Idle {
            self.enter(TaskPhase::Idle);
        }
        debug!(session = %self.session, dropped, "task-switching session abandoned");
    }

    /// Next instant at which [`Self::poll`] has work to do.
    pub fn next_wake(&self) -> Option<Instant> {
        if self.phase() != TaskPhase::Running {
            return None;
        }
        match (self.runner.deadline(), self.scheduler.next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn snapshot(&self, now: Instant) -> TaskSwitchSnapshot {
        TaskSwitchSnapshot {
            session: self.session,
            phase: self.phase(),
            trial: self.runner.current().map(|trial| TrialView {
                id: trial.id,
                stimulus: trial.stimulus,
                awaiting_response: !trial.responded,
            }),
            time_left_ms: u64::try_from(self.runner.display_time_left(now).as_millis())
                .unwrap_or(u64::MAX),
            score: self.stats.score,
            streak: self.stats.streak,
            trials_completed: self.stats.total_trials,
            trial_count: self.config.trial_count,
            feedback: self.feedback.clone(),
            summary: self.summary.clone(),
        }
    }

    pub fn phase(&self) -> TaskPhase {
        *self.phases.current()
    }

    pub fn history(&self) -> &StateHistory<TaskPhase> {
        self.phases.history()
    }

    pub fn current_trial(&self) -> Option<&ActiveTrial<TaskStimulus>> {
        self.runner.current()
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

    pub fn config(&self) -> &TaskSwitchingConfig {
        &self.config
    }

    fn drain(&mut self, now: Instant) -> Vec<Outcome> {
        let mut timeouts = Vec::new();
        while self.phase() == TaskPhase::Running {
            if let Some(resolution) = self.runner.poll(now) {
                timeouts.push(resolution.verdict.outcome);
                self.settle(resolution);
                continue;
            }
            match self.scheduler.pop_due(now) {
                Some((due, Deferred::NextTrial)) => self.present(due),
                None => break,
            }
        }
        timeouts
    }

    fn present(&mut self, at: Instant) {
        self.feedback = None;
        let trial = self.runner.begin(&mut self.rng, at);
        debug!(
            session = %self.session,
            trial = %trial.id,
            side = ?trial.stimulus.side,
            digit = trial.stimulus.digit,
            shape = trial.stimulus.shape.name,
            "trial presented"
        );
    }

    fn settle(&mut self, resolution: Resolution<TaskStimulus>) {
        let Resolution {
            trial,
            verdict,
            resolved_at,
            ..
        } = resolution;

        self.stats.record_trial(&verdict);
        let message = match verdict.outcome {
            Outcome::Correct => "✓ Correct!",
            Outcome::Incorrect => "✗ Wrong!",
            Outcome::Timeout => "✗ Too slow!",
        };
        self.feedback = Some(Feedback::new(verdict.outcome, message, verdict.score_delta));
        debug!(
            session = %self.session,
            trial = %trial,
            outcome = ?verdict.outcome,
            delta = verdict.score_delta,
            score = self.stats.score,
            "trial resolved"
        );

        if self.stats.total_trials >= self.config.trial_count {
            self.finish();
        } else {
            self.scheduler
                .schedule(resolved_at + self.config.feedback_delay, Deferred::NextTrial);
        }
    }

    fn finish(&mut self) {
        self.scheduler.cancel_all();
        self.runner.abandon();
        self.enter(TaskPhase::Ended);

        let summary =
            SessionSummary::from_stats(self.session, &self.stats, self.started_at, Utc::now());
        info!(session = %self.session, %summary, "task-switching game ended");
        self.summary = Some(summary);
    }

    fn enter(&mut self, phase: TaskPhase) {
        let result = self.phases.transition(phase);
        debug_assert!(result.is_ok(), "{result:?}");
        if let Err(err) = result {
            error!(session = %self.session, %err, "illegal phase change");
        }
    }
}

impl<R: Rng> TimedGame for TaskSwitchingEngine<R> {
    type Input = TaskSwitchInput;
    type Snapshot = TaskSwitchSnapshot;

    fn handle(&mut self, input: TaskSwitchInput, now: Instant) {
        match input {
            TaskSwitchInput::Start => {
                if let Err(err) = self.start(now) {
                    warn!(%err, "start ignored");
                }
            }
            TaskSwitchInput::Respond { trial, symbol } => {
                self.respond(trial, &symbol, now);
            }
            TaskSwitchInput::End => {
                self.end();
            }
        }
    }

    fn poll(&mut self, now: Instant) {
        self.drain(now);
    }

    fn next_wake(&self) -> Option<Instant> {
        TaskSwitchingEngine::next_wake(self)
    }

    fn navigate_away(&mut self) {
        TaskSwitchingEngine::navigate_away(self);
    }

    fn snapshot(&self, now: Instant) -> TaskSwitchSnapshot {
        TaskSwitchingEngine::snapshot(self, now)
    }
}
