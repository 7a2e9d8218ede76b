//! Metrics recording.
//!
//! # Metrics
//! - `resilience_breaker_transitions_total` (counter): state changes by endpoint, state
//! - `resilience_circuit_open_rejections_total` (counter): fast-failed calls by endpoint
//! - `resilience_timeouts_total` (counter): expired deadlines by endpoint
//! - `resilience_retries_total` (counter): recorded retries by outcome
//!
//! # Design Decisions
//! - Counters only; gauges/histograms can be derived from the snapshot
//!   surface by the embedding application
//! - Recording through the `metrics` facade; a no-op recorder costs nothing

use metrics::counter;

use crate::breaker::CircuitState;

/// Record a breaker state change for an endpoint.
pub fn record_state_change(endpoint: &str, to: CircuitState) {
    counter!(
        "resilience_breaker_transitions_total",
        "endpoint" => endpoint.to_string(),
        "state" => to.to_string()
    )
    .increment(1);
}

/// Record a call rejected while the circuit was open.
pub fn record_circuit_rejection(endpoint: &str) {
    counter!(
        "resilience_circuit_open_rejections_total",
        "endpoint" => endpoint.to_string()
    )
    .increment(1);
}

/// Record an expired deadline.
pub fn record_timeout(endpoint: &str) {
    counter!(
        "resilience_timeouts_total",
        "endpoint" => endpoint.to_string()
    )
    .increment(1);
}

/// Record one retry attempt and its outcome.
pub fn record_retry(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!("resilience_retries_total", "outcome" => outcome).increment(1);
}
