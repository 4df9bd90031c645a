//! Time sources.
//!
//! The scheduler itself never reads a clock; callers sample one and pass
//! `now` in with every turn.

use core_types::Millis;
use std::time::Instant;

pub trait Clock {
    fn now(&self) -> Millis;
}

/// Virtual time, moved forward explicitly. Never goes backwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: Millis,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: Millis) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, ms: Millis) -> Millis {
        self.now = self.now.saturating_add(ms);
        self.now
    }

    /// Move to `at`; earlier instants are ignored.
    pub fn advance_to(&mut self, at: Millis) -> Millis {
        self.now = self.now.max(at);
        self.now
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now
    }
}

/// Wall-clock milliseconds since the clock was created.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Millis {
        Millis::try_from(self.origin.elapsed().as_millis()).unwrap_or(Millis::MAX)
    }
}
