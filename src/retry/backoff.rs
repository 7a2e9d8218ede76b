//! Exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

use crate::config::RetryConfig;

/// Calculate the backoff delay before retry attempt `attempt` (1-based).
///
/// Attempt 0 returns zero: the first try is not a retry. Otherwise the
/// delay is `initial_delay_ms * backoff_multiplier^(attempt - 1)` plus
/// uniform random jitter in `[0, jitter_ms)`, capped at `max_delay_ms`.
/// The cap is applied after the jitter, so the result never exceeds
/// `max_delay_ms` for any attempt number.
pub fn calculate_backoff(config: &RetryConfig, attempt: u32) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let exponential =
        config.initial_delay_ms as f64 * config.backoff_multiplier.powi(attempt as i32 - 1);
    // Large attempt numbers overflow f64 into infinity; saturate instead.
    let exponential_ms = if exponential.is_finite() {
        exponential.min(u64::MAX as f64) as u64
    } else {
        u64::MAX
    };

    let jitter = if config.jitter_ms > 0 {
        rand::thread_rng().gen_range(0..config.jitter_ms)
    } else {
        0
    };

    Duration::from_millis(
        exponential_ms
            .saturating_add(jitter)
            .min(config.max_delay_ms),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(initial: u64, max: u64, multiplier: f64, jitter: u64) -> RetryConfig {
        RetryConfig {
            max_retries: 10,
            initial_delay_ms: initial,
            max_delay_ms: max,
            max_total_retry_duration_ms: 90_000,
            backoff_multiplier: multiplier,
            jitter_ms: jitter,
        }
    }

    #[test]
    fn test_attempt_zero_is_free() {
        let c = config(100, 2_000, 2.0, 500);
        assert_eq!(calculate_backoff(&c, 0), Duration::ZERO);
    }

    #[test]
    fn test_exponential_growth_without_jitter() {
        let c = config(100, 60_000, 2.0, 0);
        assert_eq!(calculate_backoff(&c, 1), Duration::from_millis(100));
        assert_eq!(calculate_backoff(&c, 2), Duration::from_millis(200));
        assert_eq!(calculate_backoff(&c, 3), Duration::from_millis(400));
        assert_eq!(calculate_backoff(&c, 4), Duration::from_millis(800));
    }

    #[test]
    fn test_never_exceeds_cap_even_with_jitter() {
        let c = config(100, 5_000, 2.0, 500);
        for attempt in 0..=20 {
            assert!(calculate_backoff(&c, attempt) <= Duration::from_millis(5_000));
        }
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let c = config(100, 60_000, 2.0, 50);
        for _ in 0..100 {
            let d = calculate_backoff(&c, 1).as_millis() as u64;
            assert!((100..150).contains(&d));
        }
    }

    #[test]
    fn test_huge_attempt_saturates_at_cap() {
        let c = config(1_000, 30_000, 2.0, 500);
        assert_eq!(
            calculate_backoff(&c, u32::MAX),
            Duration::from_millis(30_000)
        );
    }
}
