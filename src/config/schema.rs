//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the sidecar.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hard cap on the exponential retry backoff, in seconds. The upstream
/// transport clamps its own policy to this value, so anything larger in a
/// config file is a deployment error.
pub const MAX_BACKOFF_CAP_SECS: u64 = 30;

/// Hard cap on the number of retries per cycle.
pub const MAX_RETRIES_CAP: u32 = 5;

/// Smallest grace period over which counting failures is meaningful.
pub const MIN_GRACE_PERIOD_SECS: u64 = 45;

const DEFAULT_GRACE_PERIOD_SECS: u64 = 120;

/// Root configuration for the subscription sidecar.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SubwatchConfig {
    /// Upstream broker endpoint and topic identity.
    pub broker: BrokerConfig,

    /// Retry policy of the subscription transport.
    pub retry: RetryPolicyConfig,

    /// Failure-window settings for the liveness monitor.
    pub monitor: MonitorConfig,

    /// Health endpoint listener.
    pub listener: ListenerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Broker endpoint configuration.
///
/// Identity requires `entity_path` plus at least one of `connection_string`
/// or `namespace`; `connection_string` wins when both are set.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BrokerConfig {
    /// Full connection string, URL form (e.g. "broker://host:7430").
    pub connection_string: Option<String>,

    /// Broker namespace as "host:port", used when no connection string is set.
    pub namespace: Option<String>,

    /// Topic to subscribe to.
    pub entity_path: String,
}

impl BrokerConfig {
    /// The endpoint this sidecar connects to, if any identity is configured.
    pub fn endpoint(&self) -> Option<&str> {
        self.connection_string
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.namespace.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Exponential retry policy bounds for the subscription transport.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryPolicyConfig {
    /// Minimum backoff between retry attempts, in seconds.
    pub min_backoff_secs: u64,

    /// Maximum backoff between retry attempts, in seconds.
    pub max_backoff_secs: u64,

    /// Maximum number of retries per cycle.
    pub max_retries: u32,
}

impl RetryPolicyConfig {
    pub fn min_backoff(&self) -> Duration {
        Duration::from_secs(self.min_backoff_secs)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_secs)
    }
}

impl Default for RetryPolicyConfig {
    fn default() -> Self {
        Self {
            min_backoff_secs: 0,
            max_backoff_secs: MAX_BACKOFF_CAP_SECS,
            max_retries: MAX_RETRIES_CAP,
        }
    }
}

/// Liveness monitor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Rolling window over which reported failures are counted, in seconds.
    pub grace_period_secs: u64,
}

impl MonitorConfig {
    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_secs)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: DEFAULT_GRACE_PERIOD_SECS,
        }
    }
}

/// Health endpoint listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g. "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout for probe requests, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON-formatted logs instead of the pretty format.
    pub log_json: bool,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
