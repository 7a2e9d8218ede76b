//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! resilience control plane. All types derive Serde traits for
//! deserialization from config files, and all fields have defaults so a
//! minimal (or empty) config is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the resilience control plane.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ResilienceConfig {
    /// Default circuit breaker tuning, used for endpoints without a
    /// registered per-endpoint config.
    pub breaker: CircuitBreakerConfig,

    /// Retry budget tuning.
    pub retry: RetryConfig,

    /// Timeout tier durations.
    pub timeout: TimeoutPolicyConfig,
}

/// Circuit breaker tuning for one endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures in Closed state before tripping to Open.
    pub failure_threshold: u32,

    /// Successful half-open probes required to close the circuit.
    pub success_threshold: u32,

    /// Cooldown while Open before the next call may probe.
    pub open_timeout_ms: u64,

    /// Maximum probe calls admitted in HalfOpen before the breaker decides.
    pub half_open_max_calls: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            success_threshold: 2,
            open_timeout_ms: 60_000,
            half_open_max_calls: 3,
        }
    }
}

/// Retry budget tuning.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum retry attempts per sequence (the first try is not a retry).
    pub max_retries: u32,

    /// Backoff base delay.
    pub initial_delay_ms: u64,

    /// Hard cap on any single computed delay, jitter included.
    pub max_delay_ms: u64,

    /// Hard cap on the wall-clock duration of a whole retry sequence.
    pub max_total_retry_duration_ms: u64,

    /// Exponential growth factor between attempts.
    pub backoff_multiplier: f64,

    /// Uniform random jitter added to each delay, in `[0, jitter_ms)`.
    pub jitter_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1_000,
            max_delay_ms: 30_000,
            max_total_retry_duration_ms: 90_000,
            backoff_multiplier: 2.0,
            jitter_ms: 500,
        }
    }
}

/// Timeout tier durations, ordered fast < normal < slow.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutPolicyConfig {
    /// Deadline for health/status style endpoints.
    pub fast_ms: u64,

    /// Deadline for ordinary endpoints and anything unrecognized.
    pub normal_ms: u64,

    /// Deadline for long-running endpoints (payment initiation/confirmation).
    pub slow_ms: u64,
}

impl Default for TimeoutPolicyConfig {
    fn default() -> Self {
        Self {
            fast_ms: 5_000,
            normal_ms: 30_000,
            slow_ms: 60_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResilienceConfig::default();
        assert_eq!(config.breaker.failure_threshold, 5);
        assert_eq!(config.breaker.success_threshold, 2);
        assert_eq!(config.breaker.open_timeout_ms, 60_000);
        assert_eq!(config.breaker.half_open_max_calls, 3);
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.backoff_multiplier, 2.0);
        assert!(config.timeout.fast_ms < config.timeout.normal_ms);
        assert!(config.timeout.normal_ms < config.timeout.slow_ms);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ResilienceConfig = toml::from_str(
            r#"
            [breaker]
            failure_threshold = 2

            [timeout]
            slow_ms = 90000
            "#,
        )
        .unwrap();

        assert_eq!(config.breaker.failure_threshold, 2);
        // Untouched fields keep their defaults
        assert_eq!(config.breaker.success_threshold, 2);
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.timeout.slow_ms, 90_000);
        assert_eq!(config.timeout.normal_ms, 30_000);
    }
}
