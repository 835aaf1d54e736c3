//! Liveness monitoring subsystem.
//!
//! # Data Flow
//! ```text
//! Consumer pump (transport failure observed)
//!     → report_failure()
//!     → append monotonic timestamp to window
//!
//! Health probe (on demand)
//!     → is_alive()
//!     → prune entries older than grace period
//!     → recent count < threshold ?
//! ```
//!
//! # Design Decisions
//! - Threshold derived once from the transport retry policy, so failures the
//!   retry policy accounts for never trip the verdict
//! - One mutex guards the window; report and probe exclude each other
//! - Monotonic ticks, never wall-clock
//! - No ambient state: monitors are plain values, several can coexist

pub mod clock;
pub mod liveness;
pub mod threshold;

pub use clock::{ManualClock, MonotonicClock, SystemClock};
pub use liveness::{MonitorError, SubscriptionMonitor};
pub use threshold::{failures_per_grace_period, retry_cycle_duration, ThresholdError};
