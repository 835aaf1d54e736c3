//! Connection liveness verdict over a rolling failure window.
//!
//! # Responsibilities
//! - Record transport failures at monotonic timestamps
//! - Answer "is the subscription connection alive" on demand
//! - Prune failures older than the grace period
//!
//! # State Transitions
//! ```text
//! Alive → Unhealthy: failures within the grace period >= threshold
//! Unhealthy → Alive: pruning drops the count back under threshold
//! ```
//! Recovery is purely time-based; there is no manual reset short of a
//! process restart.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::{validate_config, SubwatchConfig, ValidationError};
use crate::monitor::clock::{MonotonicClock, SystemClock};
use crate::monitor::threshold::{failures_per_grace_period, ThresholdError};
use crate::transport::retry::ExponentialRetry;

/// Errors a monitor can produce: two at construction, one per call site bug.
#[derive(Debug)]
pub enum MonitorError {
    /// Configuration violated a bound; the process must not start.
    Config(Vec<ValidationError>),
    /// The retry policy simulates to a zero-length cycle.
    Threshold(ThresholdError),
    /// `report_failure` was called without a cause.
    EmptyCause,
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Config(errors) => {
                write!(f, "invalid configuration: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            MonitorError::Threshold(e) => write!(f, "{}", e),
            MonitorError::EmptyCause => write!(f, "a failure report requires a cause"),
        }
    }
}

impl std::error::Error for MonitorError {}

/// Rolling window of failure timestamps, in monotonic ticks.
#[derive(Debug, Default)]
struct FailureWindow {
    stamps: Vec<Duration>,
}

impl FailureWindow {
    fn record(&mut self, at: Duration) {
        self.stamps.push(at);
    }

    fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Count the entries still inside the window, then discard the expired
    /// ones. An entry exactly at the cutoff counts one last time and is then
    /// dropped. The prune is destructive on purpose: concurrent probes see a
    /// consistent, shrinking window and memory never grows past one grace
    /// period of failures.
    fn observe(&mut self, cutoff: Duration) -> usize {
        let recent = self.stamps.iter().filter(|t| **t >= cutoff).count();
        self.stamps.retain(|t| *t > cutoff);
        recent
    }
}

/// Liveness monitor for a retry-wrapped subscription connection.
///
/// Constructed once per process from a validated config; the failure
/// threshold is derived from the transport retry policy at construction and
/// cached for the monitor's lifetime.
pub struct SubscriptionMonitor {
    grace_period: Duration,
    threshold: u32,
    clock: Arc<dyn MonotonicClock>,
    window: Mutex<FailureWindow>,
}

impl std::fmt::Debug for SubscriptionMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionMonitor")
            .field("grace_period", &self.grace_period)
            .field("threshold", &self.threshold)
            .field("window", &self.window)
            .finish()
    }
}

impl SubscriptionMonitor {
    pub fn new(config: &SubwatchConfig) -> Result<Self, MonitorError> {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Construct over an injected clock. Tests use this with a manual clock
    /// to simulate time passage.
    pub fn with_clock(
        config: &SubwatchConfig,
        clock: Arc<dyn MonotonicClock>,
    ) -> Result<Self, MonitorError> {
        validate_config(config).map_err(MonitorError::Config)?;

        let grace_period = config.monitor.grace_period();
        let policy = ExponentialRetry::from_config(&config.retry);
        let threshold =
            failures_per_grace_period(&policy, grace_period).map_err(MonitorError::Threshold)?;

        tracing::info!(
            threshold,
            grace_period_secs = grace_period.as_secs(),
            "liveness monitor ready"
        );

        Ok(Self {
            grace_period,
            threshold,
            clock,
            window: Mutex::new(FailureWindow::default()),
        })
    }

    /// Failures tolerated per grace period before the verdict flips.
    pub fn failure_threshold(&self) -> u32 {
        self.threshold
    }

    /// Record a failure at the current monotonic time.
    ///
    /// The cause is logged, not stored; an empty cause is a bug at the call
    /// site and is rejected without touching the window.
    pub fn report_failure(&self, cause: impl fmt::Display) -> Result<(), MonitorError> {
        let cause = cause.to_string();
        if cause.trim().is_empty() {
            return Err(MonitorError::EmptyCause);
        }

        let now = self.clock.ticks();
        self.window
            .lock()
            .expect("failure window lock")
            .record(now);

        tracing::debug!(%cause, "transport failure reported");
        Ok(())
    }

    /// Whether the connection is considered alive.
    ///
    /// Prunes the window as a side effect; exactly `threshold` failures
    /// inside the grace period is already unhealthy.
    pub fn is_alive(&self) -> bool {
        let mut window = self.window.lock().expect("failure window lock");
        if window.is_empty() {
            return true;
        }

        let now = self.clock.ticks();
        let cutoff = now.checked_sub(self.grace_period).unwrap_or(Duration::ZERO);
        let recent = window.observe(cutoff);

        recent < self.threshold as usize
    }
}
