//! Cancellable per-trial countdown.

use std::time::{Duration, Instant};

/// Granularity of the time-left value shown to players.
pub const DISPLAY_TICK: Duration = Duration::from_millis(100);

/// Countdown for a single trial.
///
/// The clock stores the absolute deadline, never a running decrement, so a
/// late poll cannot drift the expiry. [`TrialClock::expire`] reports the
/// timeout at most once per arming and never after [`TrialClock::disarm`].
///
/// ```rust
/// use mindgames::timing::TrialClock;
/// use std::time::{Duration, Instant};
///
/// let t0 = Instant::now();
/// let mut clock = TrialClock::new();
/// clock.arm(Duration::from_millis(2500), t0);
///
/// assert!(!clock.expire(t0 + Duration::from_millis(2499)));
/// assert!(clock.expire(t0 + Duration::from_millis(2500)));
/// // Already fired.
/// assert!(!clock.expire(t0 + Duration::from_millis(9000)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TrialClock {
    deadline: Option<Instant>,
}

impl TrialClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting down `window` from `now`.
    ///
    /// Arming an armed clock is a sequencing bug in the caller.
    pub fn arm(&mut self, window: Duration, now: Instant) {
        debug_assert!(self.deadline.is_none(), "trial clock armed twice");
        self.deadline = Some(now + window);
    }

    /// Cancel the countdown. Returns whether it was armed; repeat calls are no-ops.
    pub fn disarm(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the deadline has been reached at `now` (pure).
    pub fn is_expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Fire the timeout if the deadline has passed.
    ///
    /// Returns `true` exactly once per arming; the clock disarms itself.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.is_expired(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    /// Exact time left; zero when expired or disarmed.
    pub fn time_left(&self, now: Instant) -> Duration {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }

    /// Time left rounded down to [`DISPLAY_TICK`].
    pub fn display_time_left(&self, now: Instant) -> Duration {
        let left = self.time_left(now).as_millis();
        let tick = DISPLAY_TICK.as_millis();
        Duration::from_millis(u64::try_from(left - left % tick).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn unarmed_clock_never_fires() {
        let mut clock = TrialClock::new();
        let now = Instant::now();
        assert!(clock.deadline().is_none());
        assert!(!clock.expire(now + ms(10_000)));
        assert_eq!(clock.time_left(now), Duration::ZERO);
    }

    #[test]
    fn disarm_prevents_timeout() {
        let t0 = Instant::now();
        let mut clock = TrialClock::new();
        clock.arm(ms(2500), t0);

        assert!(clock.disarm());
        assert!(!clock.disarm());
        assert!(!clock.expire(t0 + ms(5000)));
    }

    #[test]
    fn late_poll_uses_true_deadline() {
        let t0 = Instant::now();
        let mut clock = TrialClock::new();
        clock.arm(ms(2500), t0);

        assert_eq!(clock.deadline(), Some(t0 + ms(2500)));
        assert!(clock.expire(t0 + ms(4000)));
        assert!(clock.deadline().is_none());
    }

    #[test]
    fn display_time_is_quantized() {
        let t0 = Instant::now();
        let mut clock = TrialClock::new();
        clock.arm(ms(8000), t0);

        assert_eq!(clock.time_left(t0 + ms(1234)), ms(6766));
        assert_eq!(clock.display_time_left(t0 + ms(1234)), ms(6700));
        assert_eq!(clock.display_time_left(t0 + ms(7999)), ms(0));
        assert_eq!(clock.display_time_left(t0 + ms(9000)), ms(0));
    }

    #[test]
    fn rearm_after_fire_starts_fresh_window() {
        let t0 = Instant::now();
        let mut clock = TrialClock::new();
        clock.arm(ms(100), t0);
        assert!(clock.expire(t0 + ms(100)));

        clock.arm(ms(100), t0 + ms(400));
        assert!(!clock.expire(t0 + ms(450)));
        assert!(clock.expire(t0 + ms(500)));
    }
}
