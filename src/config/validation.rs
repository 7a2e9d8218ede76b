//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (thresholds > 0, multiplier >= 1.0)
//! - Check tier ordering (fast < normal < slow)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ResilienceConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted into the system

use thiserror::Error;

use crate::config::schema::ResilienceConfig;

/// A single semantic violation in a [`ResilienceConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("breaker.failure_threshold must be > 0")]
    ZeroFailureThreshold,

    #[error("breaker.success_threshold must be > 0")]
    ZeroSuccessThreshold,

    #[error("breaker.half_open_max_calls must be > 0")]
    ZeroHalfOpenMaxCalls,

    #[error("retry.max_retries must be > 0")]
    ZeroMaxRetries,

    #[error("retry.backoff_multiplier must be >= 1.0, got {0}")]
    BackoffMultiplierTooSmall(f64),

    #[error("retry.max_delay_ms ({max}) must be >= retry.initial_delay_ms ({initial})")]
    DelayCapBelowInitial { initial: u64, max: u64 },

    #[error("retry.max_total_retry_duration_ms must be > 0")]
    ZeroRetryDuration,

    #[error("timeout tiers must be ordered fast < normal < slow, got {fast}/{normal}/{slow}")]
    UnorderedTimeoutTiers { fast: u64, normal: u64, slow: u64 },
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &ResilienceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.breaker.failure_threshold == 0 {
        errors.push(ValidationError::ZeroFailureThreshold);
    }
    if config.breaker.success_threshold == 0 {
        errors.push(ValidationError::ZeroSuccessThreshold);
    }
    if config.breaker.half_open_max_calls == 0 {
        errors.push(ValidationError::ZeroHalfOpenMaxCalls);
    }

    if config.retry.max_retries == 0 {
        errors.push(ValidationError::ZeroMaxRetries);
    }
    if config.retry.backoff_multiplier < 1.0 {
        errors.push(ValidationError::BackoffMultiplierTooSmall(
            config.retry.backoff_multiplier,
        ));
    }
    if config.retry.max_delay_ms < config.retry.initial_delay_ms {
        errors.push(ValidationError::DelayCapBelowInitial {
            initial: config.retry.initial_delay_ms,
            max: config.retry.max_delay_ms,
        });
    }
    if config.retry.max_total_retry_duration_ms == 0 {
        errors.push(ValidationError::ZeroRetryDuration);
    }

    let t = &config.timeout;
    if !(t.fast_ms < t.normal_ms && t.normal_ms < t.slow_ms) {
        errors.push(ValidationError::UnorderedTimeoutTiers {
            fast: t.fast_ms,
            normal: t.normal_ms,
            slow: t.slow_ms,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
