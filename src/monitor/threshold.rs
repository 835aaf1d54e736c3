//! Failure threshold derivation.
//!
//! # Responsibilities
//! - Simulate one cycle of the transport's exponential retry policy
//! - Derive how many retry-driven failures fit in a grace period
//!
//! # Design Decisions
//! - Deterministic: the simulation uses the policy's base delays, never the
//!   jittered execution-time delays
//! - Computed once at monitor construction and cached; config is immutable
//! - A zero-length cycle is a construction error, not a clamped value

use std::time::Duration;

use thiserror::Error;

use crate::transport::retry::ExponentialRetry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ThresholdError {
    /// Every simulated attempt had a zero delay, so the cycle has no
    /// duration and the failures-per-grace-period division is undefined.
    /// Such a policy retries in a hot loop; reject it at startup.
    #[error("retry policy simulates to a zero-length cycle")]
    ZeroLengthRetryCycle,
}

/// Duration of one full retry cycle under `policy`.
///
/// Attempt delays accumulate until the attempt count is exhausted or the
/// accumulated time reaches the grace period; the attempt that crosses the
/// grace period still contributes its delay.
pub fn retry_cycle_duration(policy: &ExponentialRetry, grace_period: Duration) -> Duration {
    let mut elapsed = Duration::ZERO;
    let mut attempt = 0u32;

    while attempt <= policy.max_retries() {
        elapsed += policy.base_delay(attempt);
        if elapsed < grace_period {
            attempt += 1;
            continue;
        }
        break;
    }

    elapsed
}

/// How many failures a well-behaved retrying client is expected to produce
/// within one grace period. This is the monitor's unhealthy threshold:
/// strictly more frequent failures than the retry policy accounts for.
pub fn failures_per_grace_period(
    policy: &ExponentialRetry,
    grace_period: Duration,
) -> Result<u32, ThresholdError> {
    let cycle = retry_cycle_duration(policy, grace_period);
    if cycle.is_zero() {
        return Err(ThresholdError::ZeroLengthRetryCycle);
    }

    Ok((grace_period.as_millis() / cycle.as_millis()) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(min_secs: u64, max_secs: u64, max_retries: u32) -> ExponentialRetry {
        ExponentialRetry::new(
            Duration::from_secs(min_secs),
            Duration::from_secs(max_secs),
            max_retries,
        )
    }

    fn threshold(min_secs: u64, max_secs: u64, max_retries: u32, grace_secs: u64) -> u32 {
        failures_per_grace_period(
            &policy(min_secs, max_secs, max_retries),
            Duration::from_secs(grace_secs),
        )
        .unwrap()
    }

    #[test]
    fn known_policies_give_known_thresholds() {
        assert_eq!(threshold(0, 30, 2, 120), 8);
        assert_eq!(threshold(30, 30, 5, 120), 1);
        assert_eq!(threshold(20, 30, 5, 120), 0);
        assert_eq!(threshold(0, 30, 5, 120), 1);
        assert_eq!(threshold(0, 30, 5, 45), 0);
        assert_eq!(threshold(0, 30, 2, 45), 3);
        assert_eq!(threshold(0, 5, 2, 45), 5);
    }

    #[test]
    fn cycle_stops_at_the_attempt_that_crosses_the_grace_period() {
        // Delays 30s, 30s, 30s, 30s reach 120s exactly; the fourth attempt
        // crosses and the remaining two never run.
        let cycle = retry_cycle_duration(&policy(30, 30, 5), Duration::from_secs(120));
        assert_eq!(cycle, Duration::from_secs(120));
    }

    #[test]
    fn calculator_is_deterministic() {
        let p = policy(0, 30, 2);
        let grace = Duration::from_secs(90);
        let first = failures_per_grace_period(&p, grace).unwrap();
        for _ in 0..10 {
            assert_eq!(failures_per_grace_period(&p, grace).unwrap(), first);
        }
    }

    #[test]
    fn zero_length_cycle_is_rejected() {
        // No retries and no minimum backoff: the single attempt is instant.
        assert_eq!(
            failures_per_grace_period(&policy(0, 30, 0), Duration::from_secs(45)),
            Err(ThresholdError::ZeroLengthRetryCycle)
        );
        // A zero max_backoff clamps every delay to zero.
        assert_eq!(
            failures_per_grace_period(&policy(0, 0, 5), Duration::from_secs(45)),
            Err(ThresholdError::ZeroLengthRetryCycle)
        );
    }
}
