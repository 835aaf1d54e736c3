//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce the transport's retry policy caps
//! - Check broker identity (entity path + an endpoint)
//! - Validate listener addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure: `&SubwatchConfig → Result<(), Vec<ValidationError>>`
//! - Runs before config is accepted into the system; the monitor constructor
//!   runs it again so a monitor can never exist over an invalid policy

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{
    SubwatchConfig, MAX_BACKOFF_CAP_SECS, MAX_RETRIES_CAP, MIN_GRACE_PERIOD_SECS,
};

/// A single semantic violation in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("min_backoff_secs ({min}) cannot exceed max_backoff_secs ({max})")]
    MinBackoffAboveMax { min: u64, max: u64 },

    #[error("max_backoff_secs ({0}) exceeds the {MAX_BACKOFF_CAP_SECS}s transport cap")]
    MaxBackoffAboveCap(u64),

    #[error("max_retries ({0}) exceeds the transport cap of {MAX_RETRIES_CAP}")]
    MaxRetriesAboveCap(u32),

    #[error("grace_period_secs ({0}) is below the {MIN_GRACE_PERIOD_SECS}s minimum")]
    GracePeriodBelowMinimum(u64),

    #[error("broker.entity_path must be set")]
    MissingEntityPath,

    #[error("broker needs a connection_string or a namespace")]
    MissingEndpoint,

    #[error("{field} is not a valid socket address: {value}")]
    InvalidBindAddress { field: &'static str, value: String },
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &SubwatchConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let retry = &config.retry;
    if retry.min_backoff_secs > retry.max_backoff_secs {
        errors.push(ValidationError::MinBackoffAboveMax {
            min: retry.min_backoff_secs,
            max: retry.max_backoff_secs,
        });
    }
    if retry.max_backoff_secs > MAX_BACKOFF_CAP_SECS {
        errors.push(ValidationError::MaxBackoffAboveCap(retry.max_backoff_secs));
    }
    if retry.max_retries > MAX_RETRIES_CAP {
        errors.push(ValidationError::MaxRetriesAboveCap(retry.max_retries));
    }

    if config.monitor.grace_period_secs < MIN_GRACE_PERIOD_SECS {
        errors.push(ValidationError::GracePeriodBelowMinimum(
            config.monitor.grace_period_secs,
        ));
    }

    if config.broker.entity_path.is_empty() {
        errors.push(ValidationError::MissingEntityPath);
    }
    if config.broker.endpoint().is_none() {
        errors.push(ValidationError::MissingEndpoint);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidBindAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
