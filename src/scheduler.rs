//! Delayed "roll" after an input event.
//!
//! Every schedule call replaces the pending deadline, so a burst of
//! keystrokes produces exactly one roll once the input has settled.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RollScheduler {
    delay: Duration,
    deadline: Option<Instant>,
}

impl RollScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Cancel any pending roll and schedule a new one `delay` after `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Time left until the pending roll, if one is pending
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Returns true once when the pending deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
