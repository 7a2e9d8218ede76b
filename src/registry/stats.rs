//! Cumulative per-endpoint call statistics.

use serde::Serialize;

use crate::breaker::CircuitState;

/// Running call totals for one endpoint.
///
/// Counters are monotonically non-decreasing until an explicit reset drops
/// the whole entry. Rejected calls (`CircuitOpen`) count toward
/// `total_calls` but neither `total_failures` nor `total_successes`, so
/// `total_failures + total_successes <= total_calls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointStats {
    pub total_calls: u64,
    pub total_failures: u64,
    pub total_successes: u64,
    /// Breaker state observed after the most recent call.
    pub last_state: CircuitState,
}

impl EndpointStats {
    pub(crate) fn new() -> Self {
        Self {
            total_calls: 0,
            total_failures: 0,
            total_successes: 0,
            last_state: CircuitState::Closed,
        }
    }

    /// Fraction of calls that ran and failed; 0.0 when nothing was called.
    pub fn failure_rate(&self) -> f64 {
        if self.total_calls > 0 {
            self.total_failures as f64 / self.total_calls as f64
        } else {
            0.0
        }
    }
}

impl Default for EndpointStats {
    fn default() -> Self {
        Self::new()
    }
}
