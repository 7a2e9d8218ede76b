//! Deadline enforcement around caller-supplied operations.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::TimeoutPolicyConfig;
use crate::observability::metrics;
use crate::outcome::OperationResult;
use crate::timeout::metrics::{MetricLog, TimeoutMetric, TimeoutStats, TIMEOUT_LOG_CAPACITY};
use crate::timeout::profile::{profile_for_endpoint, TimeoutConfig, TimeoutProfile};

/// Applies a per-tier deadline to operations and keeps a bounded rolling
/// log of outcomes.
///
/// Construct one per composition root and inject it; nothing here is a
/// process-wide singleton.
#[derive(Debug)]
pub struct TimeoutManager {
    policy: TimeoutPolicyConfig,
    log: MetricLog,
}

impl TimeoutManager {
    /// Create a manager with the given tier durations.
    pub fn new(policy: TimeoutPolicyConfig) -> Self {
        Self {
            policy,
            log: MetricLog::new(TIMEOUT_LOG_CAPACITY),
        }
    }

    /// Create a manager with default tier durations.
    pub fn with_defaults() -> Self {
        Self::new(TimeoutPolicyConfig::default())
    }

    /// Tier for an endpoint.
    pub fn profile_for(&self, endpoint: &str) -> TimeoutProfile {
        profile_for_endpoint(endpoint)
    }

    /// Deadlines for an endpoint: the tier scalar repeated across
    /// connect/read/write/total.
    pub fn timeout_config(&self, endpoint: &str) -> TimeoutConfig {
        let timeout_ms = match self.profile_for(endpoint) {
            TimeoutProfile::Fast => self.policy.fast_ms,
            TimeoutProfile::Normal => self.policy.normal_ms,
            TimeoutProfile::Slow => self.policy.slow_ms,
        };
        TimeoutConfig::uniform(timeout_ms)
    }

    /// Race `op` against the endpoint's total deadline.
    ///
    /// On expiry the future is dropped — cancellation happens at its next
    /// suspension point — and `Timeout` carries the configured deadline,
    /// not the elapsed time. A metric with the measured execution time is
    /// recorded on both paths.
    pub async fn with_timeout<F, T, E>(&self, endpoint: &str, op: F) -> OperationResult<T, E>
    where
        F: Future<Output = OperationResult<T, E>>,
    {
        let deadline = Duration::from_millis(self.timeout_config(endpoint).total_timeout_ms);
        let started = Instant::now();

        match tokio::time::timeout(deadline, op).await {
            Ok(result) => {
                self.record(endpoint, deadline, false, started.elapsed());
                result
            }
            Err(_) => {
                self.record(endpoint, deadline, true, started.elapsed());
                tracing::warn!(
                    endpoint,
                    timeout_ms = deadline.as_millis() as u64,
                    "operation timed out"
                );
                metrics::record_timeout(endpoint);
                OperationResult::Timeout(deadline)
            }
        }
    }

    /// Like [`with_timeout`](Self::with_timeout) but collapses expiry into
    /// `None`, losing the reason. Known limitation kept for callers that
    /// only care whether a value arrived.
    pub async fn with_timeout_or_none<F, T>(&self, endpoint: &str, op: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let deadline = Duration::from_millis(self.timeout_config(endpoint).total_timeout_ms);
        let started = Instant::now();

        match tokio::time::timeout(deadline, op).await {
            Ok(value) => {
                self.record(endpoint, deadline, false, started.elapsed());
                Some(value)
            }
            Err(_) => {
                self.record(endpoint, deadline, true, started.elapsed());
                metrics::record_timeout(endpoint);
                None
            }
        }
    }

    fn record(&self, endpoint: &str, deadline: Duration, timed_out: bool, execution: Duration) {
        self.log.record(TimeoutMetric {
            endpoint: endpoint.to_string(),
            timeout_ms: deadline.as_millis() as u64,
            timed_out,
            execution_time_ms: execution.as_millis() as u64,
        });
    }

    /// Retained metrics, oldest first.
    pub fn metrics(&self) -> Vec<TimeoutMetric> {
        self.log.snapshot()
    }

    /// Drop all retained metrics.
    pub fn clear_metrics(&self) {
        self.log.clear()
    }

    /// Aggregate stats, global (`None`) or for one endpoint.
    pub fn stats(&self, endpoint: Option<&str>) -> TimeoutStats {
        self.log.stats(endpoint)
    }
}

impl Default for TimeoutManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(fast: u64, normal: u64, slow: u64) -> TimeoutPolicyConfig {
        TimeoutPolicyConfig {
            fast_ms: fast,
            normal_ms: normal,
            slow_ms: slow,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_in_time_passes_through() {
        let manager = TimeoutManager::new(policy(50, 100, 200));

        let result: OperationResult<u32, &'static str> = manager
            .with_timeout("/users", async {
                tokio::time::sleep(Duration::from_millis(40)).await;
                OperationResult::Success(7)
            })
            .await;

        assert_eq!(result, OperationResult::Success(7));

        let metrics = manager.metrics();
        assert_eq!(metrics.len(), 1);
        assert!(!metrics[0].timed_out);
        assert_eq!(metrics[0].timeout_ms, 100);
        assert!((40..100).contains(&metrics[0].execution_time_ms));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_returns_configured_deadline() {
        let manager = TimeoutManager::new(policy(50, 100, 200));

        let result: OperationResult<u32, &'static str> = manager
            .with_timeout("/users", async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                OperationResult::Success(7)
            })
            .await;

        // The configured deadline, not the elapsed time.
        assert_eq!(result, OperationResult::Timeout(Duration::from_millis(100)));

        let metrics = manager.metrics();
        assert!(metrics[0].timed_out);
        assert!(metrics[0].execution_time_ms >= 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tier_selection_applies_fast_deadline() {
        let manager = TimeoutManager::new(policy(50, 100, 200));

        let result: OperationResult<(), ()> = manager
            .with_timeout("/health", async {
                tokio::time::sleep(Duration::from_millis(75)).await;
                OperationResult::Success(())
            })
            .await;

        assert_eq!(result, OperationResult::Timeout(Duration::from_millis(50)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_inner_variants_pass_through_unchanged() {
        let manager = TimeoutManager::with_defaults();

        let failure: OperationResult<(), &'static str> = manager
            .with_timeout("/users", async { OperationResult::Failure("boom") })
            .await;
        assert_eq!(failure, OperationResult::Failure("boom"));

        let open: OperationResult<(), &'static str> = manager
            .with_timeout("/users", async { OperationResult::CircuitOpen })
            .await;
        assert_eq!(open, OperationResult::CircuitOpen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_or_none_collapses_expiry() {
        let manager = TimeoutManager::new(policy(50, 100, 200));

        let hit = manager
            .with_timeout_or_none("/users", async { 42u32 })
            .await;
        assert_eq!(hit, Some(42));

        let miss = manager
            .with_timeout_or_none("/users", async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                42u32
            })
            .await;
        assert_eq!(miss, None);

        let stats = manager.stats(Some("/users"));
        assert_eq!(stats.total_calls, 2);
        assert_eq!(stats.timeouts, 1);
    }

    #[tokio::test]
    async fn test_clear_metrics() {
        let manager = TimeoutManager::with_defaults();
        manager.with_timeout_or_none("/users", async {}).await;
        assert_eq!(manager.metrics().len(), 1);

        manager.clear_metrics();
        assert!(manager.metrics().is_empty());
        assert_eq!(manager.stats(None).total_calls, 0);
    }
}
