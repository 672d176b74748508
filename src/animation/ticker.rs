use std::time::{Duration, Instant};

/// A recurring single-deadline timer.
///
/// The ticker never fires on its own: the owner asks whether it is due and, if so, consumes the deadline
/// via [`Ticker::fire`]. Re-arming drops whatever wait was in flight and starts a fresh one.
#[derive(Debug)]
pub(crate) struct Ticker {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Ticker {
    /// Create a disarmed ticker.
    pub(crate) fn new(interval: Duration) -> Self {
        Self { interval, deadline: None }
    }

    /// Start a fresh wait of one full interval from `now`.
    pub(crate) fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub(crate) fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Cancel the in-flight wait and restart at `interval`.
    pub(crate) fn rearm(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.arm(now);
    }

    pub(crate) fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Consume a due deadline and schedule the next one. Returns whether it was due.
    ///
    /// The next deadline follows the consumed one, not `now`, so late polls don't push the schedule
    /// back. Deadlines missed entirely are dropped rather than fired in a burst.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline.filter(|deadline| now >= *deadline) else {
            return false;
        };
        let next = deadline + self.interval;
        self.deadline = Some(if next > now { next } else { now + self.interval });
        true
    }

    /// How long until the next deadline, if armed.
    pub(crate) fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_duration_since(now))
    }
}
