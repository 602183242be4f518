//! Cancellable one-shot timers for coalescing bursts of work.
//!
//! The frame loop polls [`Debouncer::fire`] each update; the deadline is
//! pushed back on every `schedule`, so only the last request in a burst
//! actually runs.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the timer; supersedes any pending deadline
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop any pending deadline
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once when the deadline has passed
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
