//! Trailing-edge debounce driven by an external clock.
//!
//! The debouncer never spawns anything. The owner schedules a value, then
//! polls with the current instant from its event loop; the value is released
//! once, after the quiet period has elapsed since the last schedule.

use std::time::{Duration, Instant};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value and restart the quiet period from `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Release the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((deadline, _)) if now >= *deadline);
        if due {
            self.cancel()
        } else {
            None
        }
    }

    /// Time left before the pending value fires.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(deadline, _)| deadline.saturating_duration_since(now))
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}
