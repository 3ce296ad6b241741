//! Deferred actions keyed by a generation counter.

use std::time::Instant;

#[derive(Debug, Clone)]
struct Deferred<A> {
    due: Instant,
    generation: u64,
    seq: u64,
    action: A,
}

/// Queue of actions the engine must apply to itself later.
///
/// Actions are plain data. Nothing runs on its own: the owner drains due
/// actions with [`Scheduler::pop_due`] and applies them. [`Scheduler::cancel_all`]
/// bumps the generation, and any entry from an older generation is dropped
/// unseen, so a stale "advance" can never touch a reset session.
///
/// ```rust
/// use mindgames::timing::Scheduler;
/// use std::time::{Duration, Instant};
///
/// let t0 = Instant::now();
/// let mut scheduler = Scheduler::new();
/// scheduler.schedule(t0 + Duration::from_millis(300), "next trial");
///
/// assert!(scheduler.pop_due(t0).is_none());
/// scheduler.cancel_all();
/// assert!(scheduler.pop_due(t0 + Duration::from_secs(1)).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    generation: u64,
    next_seq: u64,
    pending: Vec<Deferred<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Queue `action` to run once `due` has passed.
    pub fn schedule(&mut self, due: Instant, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Deferred {
            due,
            generation: self.generation,
            seq,
            action,
        });
    }

    /// Invalidate everything scheduled so far. Returns the live count dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.len();
        self.generation += 1;
        self.pending.clear();
        dropped
    }

    /// Earliest live due time.
    pub fn next_due(&self) -> Option<Instant> {
        self.live().map(|d| d.due).min()
    }

    /// Remove and return the earliest live action due at `now`, with its due time.
    ///
    /// Ties run in scheduling order.
    pub fn pop_due(&mut self, now: Instant) -> Option<(Instant, A)> {
        let generation = self.generation;
        self.pending.retain(|d| d.generation == generation);

        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, d)| d.due <= now)
            .min_by_key(|(_, d)| (d.due, d.seq))
            .map(|(idx, _)| idx)?;

        let deferred = self.pending.swap_remove(idx);
        tracing::trace!(generation, seq = deferred.seq, "deferred action due");
        Some((deferred.due, deferred.action))
    }

    /// Number of live actions.
    pub fn len(&self) -> usize {
        self.live().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn live(&self) -> impl Iterator<Item = &Deferred<A>> {
        self.pending
            .iter()
            .filter(move |d| d.generation == self.generation)
    }
}
