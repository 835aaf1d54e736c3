//! Health endpoint subsystem.
//!
//! # Data Flow
//! ```text
//! Orchestrator liveness probe
//!     → GET /health/liveness
//!     → monitor.is_alive()
//!     → 200 healthy / 503 degraded
//!
//! Operator CLI
//!     → GET /status
//!     → version, subscription identity, threshold, verdict
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HealthServer};
