//! The response-window race between a player and the trial clock.

use crate::timing::TrialClock;
use crate::trial::generator::StimulusGenerator;
use crate::trial::judge::{Judge, Verdict};
use crate::trial::TrialId;
use rand::Rng;
use std::time::{Duration, Instant};

/// A trial that has been presented.
#[derive(Debug, Clone)]
pub struct ActiveTrial<S> {
    pub id: TrialId,
    pub stimulus: S,
    pub started_at: Instant,
    /// Set once a response or the timeout has resolved the trial
    pub responded: bool,
}

/// The single outcome of a trial.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<S> {
    pub trial: TrialId,
    pub stimulus: S,
    pub verdict: Verdict,
    /// When the outcome happened: the response time, or the deadline for a timeout
    pub resolved_at: Instant,
}

/// Generic timed trial engine.
///
/// Presents stimuli from `G`, arms a [`TrialClock`] for each one and lets
/// exactly one of "response" or "timeout" resolve it through `J`. Both
/// paths check the `responded` flag and the clock is disarmed on response,
/// so the loser of the race is always a silent no-op.
///
/// Responses are measured against the true deadline: one processed at or
/// after the deadline loses to the timeout even if the timeout has not
/// been polled yet.
#[derive(Debug)]
pub struct TrialRunner<G: StimulusGenerator, J> {
    generator: G,
    judge: J,
    window: Duration,
    clock: TrialClock,
    current: Option<ActiveTrial<G::Stimulus>>,
    issued: u64,
}

impl<G, J> TrialRunner<G, J>
where
    G: StimulusGenerator,
    J: Judge<Stimulus = G::Stimulus>,
{
    pub fn new(generator: G, judge: J, window: Duration) -> Self {
        Self {
            generator,
            judge,
            window,
            clock: TrialClock::new(),
            current: None,
            issued: 0,
        }
    }

    /// Swap difficulty parameters for trials begun from now on.
    pub fn reconfigure(&mut self, generator: G, window: Duration) {
        self.generator = generator;
        self.window = window;
    }

    /// Generate and present a new trial, arming its clock at `now`.
    pub fn begin<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) -> &ActiveTrial<G::Stimulus> {
        let unresolved = self.is_awaiting();
        debug_assert!(!unresolved, "new trial begun while another is unresolved");
        if unresolved {
            tracing::error!(issued = self.issued, "replacing an unresolved trial");
        }

        self.clock.disarm();
        self.issued += 1;
        let trial = ActiveTrial {
            id: TrialId(self.issued),
            stimulus: self.generator.generate(rng),
            started_at: now,
            responded: false,
        };
        self.clock.arm(self.window, now);
        self.current.insert(trial)
    }

    /// Deliver a response for trial `id`.
    ///
    /// Returns `None` for stale ids and for trials that already have an
    /// outcome. A response processed past the deadline resolves the trial
    /// as a timeout instead.
    pub fn respond(
        &mut self,
        id: TrialId,
        response: &J::Response,
        now: Instant,
    ) -> Option<Resolution<G::Stimulus>> {
        let trial = self.current.as_ref()?;
        if trial.id != id || trial.responded {
            return None;
        }
        if self.clock.is_expired(now) {
            return self.poll(now);
        }

        self.clock.disarm();
        let trial = self.current.as_mut()?;
        trial.responded = true;
        let reaction_time = now.saturating_duration_since(trial.started_at);
        let verdict = self.judge.judge(&trial.stimulus, response, reaction_time);

        Some(Resolution {
            trial: trial.id,
            stimulus: trial.stimulus.clone(),
            verdict,
            resolved_at: now,
        })
    }

    /// Resolve the current trial as a timeout if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Resolution<G::Stimulus>> {
        let deadline = self.clock.deadline()?;
        let trial = self.current.as_mut()?;
        if trial.responded || !self.clock.expire(now) {
            return None;
        }

        trial.responded = true;
        let verdict = self.judge.timeout(&trial.stimulus);
        Some(Resolution {
            trial: trial.id,
            stimulus: trial.stimulus.clone(),
            verdict,
            resolved_at: deadline,
        })
    }

    /// Drop the current trial and its clock without an outcome.
    pub fn abandon(&mut self) {
        self.clock.disarm();
        self.current = None;
    }

    pub fn current(&self) -> Option<&ActiveTrial<G::Stimulus>> {
        self.current.as_ref()
    }

    /// Whether a presented trial is still waiting for its outcome.
    pub fn is_awaiting(&self) -> bool {
        self.current.as_ref().is_some_and(|t| !t.responded)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.clock.deadline()
    }

    pub fn display_time_left(&self, now: Instant) -> Duration {
        self.clock.display_time_left(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trial::judge::{Outcome, StreakEffect};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Digits;

    impl StimulusGenerator for Digits {
        type Stimulus = u8;

        fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
            rng.gen_range(1..=9)
        }
    }

    struct Parity;

    impl Judge for Parity {
        type Stimulus = u8;
        type Response = bool;

        fn judge(&self, digit: &u8, said_even: &bool, reaction_time: Duration) -> Verdict {
            if (digit % 2 == 0) == *said_even {
                Verdict::correct(1, Some(reaction_time), StreakEffect::Extend)
            } else {
                Verdict::incorrect(1, StreakEffect::Reset)
            }
        }

        fn timeout(&self, _digit: &u8) -> Verdict {
            Verdict::timeout(2, StreakEffect::Reset)
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn runner() -> TrialRunner<Digits, Parity> {
        TrialRunner::new(Digits, Parity, ms(2500))
    }

    #[test]
    fn response_resolves_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let t0 = Instant::now();
        let mut runner = runner();
        let trial = runner.begin(&mut rng, t0).clone();
        let even = trial.stimulus % 2 == 0;

        let first = runner.respond(trial.id, &even, t0 + ms(400)).unwrap();
        assert_eq!(first.verdict.outcome, Outcome::Correct);
        assert_eq!(first.verdict.reaction_time, Some(ms(400)));
        assert_eq!(first.resolved_at, t0 + ms(400));

        assert!(runner.respond(trial.id, &even, t0 + ms(500)).is_none());
        assert!(runner.poll(t0 + ms(5000)).is_none());
        assert!(!runner.is_awaiting());
    }

    #[test]
    fn response_after_timeout_is_ignored() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let t0 = Instant::now();
        let mut runner = runner();
        let id = runner.begin(&mut rng, t0).id;

        let timeout = runner.poll(t0 + ms(2600)).unwrap();
        assert_eq!(timeout.verdict.outcome, Outcome::Timeout);
        assert_eq!(timeout.resolved_at, t0 + ms(2500));

        assert!(runner.respond(id, &true, t0 + ms(2601)).is_none());
    }

    #[test]
    fn response_at_deadline_loses_to_timeout() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let t0 = Instant::now();
        let mut runner = runner();
        let id = runner.begin(&mut rng, t0).id;

        let resolution = runner.respond(id, &true, t0 + ms(2500)).unwrap();
        assert_eq!(resolution.verdict.outcome, Outcome::Timeout);
        assert!(runner.poll(t0 + ms(2500)).is_none());
    }

    #[test]
    fn stale_trial_ids_are_ignored() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let t0 = Instant::now();
        let mut runner = runner();
        let first = runner.begin(&mut rng, t0).id;
        runner.poll(t0 + ms(2500)).unwrap();

        let second = runner.begin(&mut rng, t0 + ms(2800)).id;
        assert_ne!(first, second);
        assert!(runner.respond(first, &true, t0 + ms(2900)).is_none());
        assert!(runner.is_awaiting());
    }

    #[test]
    fn abandon_cancels_pending_timeout() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let t0 = Instant::now();
        let mut runner = runner();
        runner.begin(&mut rng, t0);

        runner.abandon();
        assert!(runner.current().is_none());
        assert!(runner.deadline().is_none());
        assert!(runner.poll(t0 + ms(10_000)).is_none());
    }
}
