//! Deadline timer that paces continuous runs.

use std::time::{Duration, Instant};

/// Time between generations while running continuously
pub const DEFAULT_RUN_INTERVAL: Duration = Duration::from_millis(100);

/// Deadline-based repeating timer driving continuous runs.
///
/// The engine keeps at most one of these in an `Option`; dropping the value
/// cancels the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTimer {
    interval: Duration,
    next_due: Instant,
}

impl RunTimer {
    /// First tick fires one interval after `now`.
    pub fn start(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// True if a tick is due. Fires at most once per call and schedules the
    /// next tick from `now`, so a late poll does not produce catch-up ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }
}
