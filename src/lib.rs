//! Sidecar health monitor for a message-subscription worker.

pub mod config;
pub mod consumer;
pub mod http;
pub mod lifecycle;
pub mod monitor;
pub mod observability;
pub mod transport;

pub use config::SubwatchConfig;
pub use http::HealthServer;
pub use lifecycle::Shutdown;
pub use monitor::SubscriptionMonitor;
