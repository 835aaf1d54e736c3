//! Monotonic time sources.
//!
//! # Responsibilities
//! - Provide the tick source the failure window timestamps against
//! - Keep verdicts immune to wall-clock adjustments
//!
//! # Design Decisions
//! - A trait seam so tests simulate time passage without real delays
//! - Ticks are the duration since the clock's origin, not wall time

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Monotonic tick source.
pub trait MonotonicClock: Send + Sync {
    /// Ticks elapsed since the clock's origin.
    fn ticks(&self) -> Duration;
}

/// Production clock, backed by `Instant`.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for SystemClock {
    fn ticks(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().expect("clock lock") += by;
    }
}

impl MonotonicClock for ManualClock {
    fn ticks(&self) -> Duration {
        *self.now.lock().expect("clock lock")
    }
}
