//! Bounded rolling log of per-call timeout outcomes.

use std::sync::Mutex;

use serde::Serialize;

/// Maximum retained metrics; the oldest entry is evicted first.
pub const TIMEOUT_LOG_CAPACITY: usize = 1000;

/// One guarded call's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeoutMetric {
    pub endpoint: String,
    /// The deadline that applied, not the elapsed time.
    pub timeout_ms: u64,
    pub timed_out: bool,
    /// Measured execution time, both on completion and on expiry.
    pub execution_time_ms: u64,
}

/// Aggregate view over the retained metrics, global or per endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeoutStats {
    pub total_calls: u64,
    pub timeouts: u64,
    pub avg_execution_time_ms: u64,
    pub max_execution_time_ms: u64,
    pub timeout_rate: f64,
}

/// Fixed-capacity circular buffer with an index cursor.
///
/// The slot vector grows once up to capacity and is never resized after;
/// eviction overwrites the oldest slot in place, keeping memory bounded
/// deterministically.
#[derive(Debug)]
struct MetricRing {
    slots: Vec<TimeoutMetric>,
    capacity: usize,
    /// Oldest entry once the ring is full; insertion point for eviction.
    cursor: usize,
}

impl MetricRing {
    fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    fn push(&mut self, metric: TimeoutMetric) {
        if self.slots.len() < self.capacity {
            self.slots.push(metric);
        } else {
            self.slots[self.cursor] = metric;
            self.cursor = (self.cursor + 1) % self.capacity;
        }
    }

    fn snapshot(&self) -> Vec<TimeoutMetric> {
        let mut out = Vec::with_capacity(self.slots.len());
        out.extend_from_slice(&self.slots[self.cursor..]);
        out.extend_from_slice(&self.slots[..self.cursor]);
        out
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.cursor = 0;
    }
}

/// Thread-safe metric log; a single lock covers write, evict, and read so
/// the bounded-buffer invariant is exact.
#[derive(Debug)]
pub(crate) struct MetricLog {
    ring: Mutex<MetricRing>,
}

impl MetricLog {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            ring: Mutex::new(MetricRing::new(capacity)),
        }
    }

    pub(crate) fn record(&self, metric: TimeoutMetric) {
        self.ring
            .lock()
            .expect("timeout metrics mutex poisoned")
            .push(metric);
    }

    /// Retained metrics, oldest first.
    pub(crate) fn snapshot(&self) -> Vec<TimeoutMetric> {
        self.ring
            .lock()
            .expect("timeout metrics mutex poisoned")
            .snapshot()
    }

    pub(crate) fn clear(&self) {
        self.ring
            .lock()
            .expect("timeout metrics mutex poisoned")
            .clear();
    }

    /// Aggregate the retained metrics, optionally for one endpoint.
    pub(crate) fn stats(&self, endpoint: Option<&str>) -> TimeoutStats {
        let ring = self.ring.lock().expect("timeout metrics mutex poisoned");

        let mut total_calls = 0u64;
        let mut timeouts = 0u64;
        let mut execution_sum = 0u64;
        let mut execution_max = 0u64;

        for metric in &ring.slots {
            if let Some(filter) = endpoint {
                if metric.endpoint != filter {
                    continue;
                }
            }
            total_calls += 1;
            if metric.timed_out {
                timeouts += 1;
            }
            execution_sum += metric.execution_time_ms;
            execution_max = execution_max.max(metric.execution_time_ms);
        }

        TimeoutStats {
            total_calls,
            timeouts,
            avg_execution_time_ms: if total_calls > 0 {
                execution_sum / total_calls
            } else {
                0
            },
            max_execution_time_ms: execution_max,
            timeout_rate: if total_calls > 0 {
                timeouts as f64 / total_calls as f64
            } else {
                0.0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(endpoint: &str, execution_time_ms: u64, timed_out: bool) -> TimeoutMetric {
        TimeoutMetric {
            endpoint: endpoint.to_string(),
            timeout_ms: 1_000,
            timed_out,
            execution_time_ms,
        }
    }

    #[test]
    fn test_ring_evicts_oldest_at_capacity() {
        let log = MetricLog::new(3);
        for i in 0..5 {
            log.record(metric(&format!("/e{}", i), i, false));
        }

        let snapshot = log.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].endpoint, "/e2");
        assert_eq!(snapshot[2].endpoint, "/e4");
    }

    #[test]
    fn test_ring_never_exceeds_capacity() {
        let log = MetricLog::new(8);
        for i in 0..100 {
            log.record(metric("/x", i, false));
        }
        assert_eq!(log.snapshot().len(), 8);
    }

    #[test]
    fn test_stats_aggregation() {
        let log = MetricLog::new(10);
        log.record(metric("/a", 100, false));
        log.record(metric("/a", 300, true));
        log.record(metric("/b", 50, false));

        let all = log.stats(None);
        assert_eq!(all.total_calls, 3);
        assert_eq!(all.timeouts, 1);
        assert_eq!(all.avg_execution_time_ms, 150);
        assert_eq!(all.max_execution_time_ms, 300);

        let a = log.stats(Some("/a"));
        assert_eq!(a.total_calls, 2);
        assert_eq!(a.timeout_rate, 0.5);
    }

    #[test]
    fn test_stats_of_empty_log() {
        let stats = MetricLog::new(4).stats(None);
        assert_eq!(stats.total_calls, 0);
        assert_eq!(stats.avg_execution_time_ms, 0);
        assert_eq!(stats.timeout_rate, 0.0);
    }

    #[test]
    fn test_clear_resets_cursor() {
        let log = MetricLog::new(2);
        log.record(metric("/a", 1, false));
        log.record(metric("/b", 2, false));
        log.record(metric("/c", 3, false));
        log.clear();

        log.record(metric("/d", 4, false));
        let snapshot = log.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].endpoint, "/d");
    }
}
