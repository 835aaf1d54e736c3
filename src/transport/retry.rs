//! Exponential retry policy for the subscription transport.

use std::time::Duration;

use rand::Rng;

use crate::config::RetryPolicyConfig;

/// Per-attempt growth unit of the exponential backoff, in milliseconds.
/// Matches the transport's internal max-interval unit; the threshold
/// calculator simulates against the same constant.
pub const RETRY_INTERVAL_UNIT_MS: u64 = 3_600;

/// Retry policy with exponentially growing, capped delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialRetry {
    min_backoff: Duration,
    max_backoff: Duration,
    max_retries: u32,
}

impl ExponentialRetry {
    pub fn new(min_backoff: Duration, max_backoff: Duration, max_retries: u32) -> Self {
        Self {
            min_backoff,
            max_backoff,
            max_retries,
        }
    }

    pub fn from_config(config: &RetryPolicyConfig) -> Self {
        Self::new(
            config.min_backoff(),
            config.max_backoff(),
            config.max_retries,
        )
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Deterministic delay before the given 0-based attempt:
    /// `min(min_backoff + (2^attempt − 1) × 3600 ms, max_backoff)`.
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let increment = 2u64
            .saturating_pow(attempt)
            .saturating_sub(1)
            .saturating_mul(RETRY_INTERVAL_UNIT_MS);
        let delay_ms = (self.min_backoff.as_millis() as u64)
            .saturating_add(increment)
            .min(self.max_backoff.as_millis() as u64);

        Duration::from_millis(delay_ms)
    }

    /// Execution-time delay: the base delay plus up to 10% jitter. Jitter
    /// never feeds the threshold calculation, which must stay deterministic.
    pub fn jittered_delay(&self, attempt: u32) -> Duration {
        let base = self.base_delay(attempt);
        let jitter_range = base.as_millis() as u64 / 10;
        let jitter = if jitter_range > 0 {
            rand::thread_rng().gen_range(0..jitter_range)
        } else {
            0
        };

        base + Duration::from_millis(jitter)
    }

    /// True once the 0-based attempt counter has run past the policy.
    pub fn is_exhausted(&self, attempt: u32) -> bool {
        attempt > self.max_retries
    }
}
