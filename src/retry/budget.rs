//! Retry budget: bounded attempts, bounded time, running metrics.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::config::RetryConfig;
use crate::observability::metrics;
use crate::retry::backoff;

/// Bounds and paces one logical retry sequence.
///
/// Scope is one sequence per instance; share a single instance explicitly
/// when cross-sequence aggregate reporting is wanted. Counters are atomic,
/// so [`RetryBudget::metrics`] yields eventually-consistent snapshots
/// without locking.
#[derive(Debug)]
pub struct RetryBudget {
    config: RetryConfig,
    total_retries: AtomicU32,
    successful_retries: AtomicU32,
    failed_retries: AtomicU32,
    total_retry_duration_ms: AtomicU64,
    max_delay_used_ms: AtomicU64,
}

/// Snapshot of a budget's running counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetryMetrics {
    pub total_retries: u32,
    pub successful_retries: u32,
    pub failed_retries: u32,
    /// Sum of recorded delays — a reporting figure, not the wall clock the
    /// caller feeds to `can_retry`.
    pub total_retry_duration_ms: u64,
    pub avg_delay_ms: u64,
    pub max_delay_ms: u64,
}

/// Terminal condition of a retry loop: neither attempts nor time remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("retry budget exhausted after {elapsed_ms}ms (max: {max_ms}ms)")]
pub struct RetryBudgetExhausted {
    pub elapsed_ms: u64,
    pub max_ms: u64,
}

impl RetryBudget {
    /// Create a budget with the given tuning.
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            total_retries: AtomicU32::new(0),
            successful_retries: AtomicU32::new(0),
            failed_retries: AtomicU32::new(0),
            total_retry_duration_ms: AtomicU64::new(0),
            max_delay_used_ms: AtomicU64::new(0),
        }
    }

    /// Create a budget with default tuning.
    pub fn with_defaults() -> Self {
        Self::new(RetryConfig::default())
    }

    /// Whether another retry may run.
    ///
    /// `attempt_index` is the number of retries already performed;
    /// `total_elapsed` is the caller's wall clock for the whole sequence.
    /// Both ceilings are independent and hard.
    pub fn can_retry(&self, attempt_index: u32, total_elapsed: Duration) -> bool {
        if attempt_index >= self.config.max_retries {
            return false;
        }
        if total_elapsed.as_millis() as u64 >= self.config.max_total_retry_duration_ms {
            return false;
        }
        true
    }

    /// Backoff delay before retry `attempt_index` (1-based).
    pub fn calculate_delay(&self, attempt_index: u32) -> Duration {
        backoff::calculate_backoff(&self.config, attempt_index)
    }

    /// Record one performed retry and the delay that preceded it.
    pub fn record_retry(&self, delay: Duration, success: bool) {
        let delay_ms = delay.as_millis() as u64;

        self.total_retries.fetch_add(1, Ordering::Relaxed);
        self.total_retry_duration_ms
            .fetch_add(delay_ms, Ordering::Relaxed);
        self.max_delay_used_ms.fetch_max(delay_ms, Ordering::Relaxed);

        if success {
            self.successful_retries.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_retries.fetch_add(1, Ordering::Relaxed);
        }

        metrics::record_retry(success);
    }

    /// Snapshot the running counters.
    pub fn metrics(&self) -> RetryMetrics {
        let total = self.total_retries.load(Ordering::Relaxed);
        let duration = self.total_retry_duration_ms.load(Ordering::Relaxed);

        RetryMetrics {
            total_retries: total,
            successful_retries: self.successful_retries.load(Ordering::Relaxed),
            failed_retries: self.failed_retries.load(Ordering::Relaxed),
            total_retry_duration_ms: duration,
            avg_delay_ms: if total > 0 { duration / total as u64 } else { 0 },
            max_delay_ms: self.max_delay_used_ms.load(Ordering::Relaxed),
        }
    }

    /// Zero all counters.
    pub fn reset(&self) {
        self.total_retries.store(0, Ordering::Relaxed);
        self.successful_retries.store(0, Ordering::Relaxed);
        self.failed_retries.store(0, Ordering::Relaxed);
        self.total_retry_duration_ms.store(0, Ordering::Relaxed);
        self.max_delay_used_ms.store(0, Ordering::Relaxed);
    }

    /// Tuning this budget was built with.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}

impl Default for RetryBudget {
    fn default() -> Self {
        Self::with_defaults()
    }
}
