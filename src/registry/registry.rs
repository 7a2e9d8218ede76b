//! Endpoint-keyed breaker store with aggregated call statistics.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;

use crate::breaker::{CircuitBreaker, CircuitState};
use crate::config::CircuitBreakerConfig;
use crate::observability::metrics;
use crate::outcome::OperationResult;
use crate::registry::stats::EndpointStats;

/// Owns one [`CircuitBreaker`] per endpoint plus cumulative call stats.
///
/// Construct one per composition root and inject it; nothing here is a
/// process-wide singleton, so tests get full isolation.
#[derive(Debug, Default)]
pub struct CircuitBreakerRegistry {
    default_config: CircuitBreakerConfig,
    breakers: DashMap<String, Arc<CircuitBreaker>>,
    configs: DashMap<String, CircuitBreakerConfig>,
    stats: DashMap<String, EndpointStats>,
}

impl CircuitBreakerRegistry {
    /// Create a registry whose unconfigured endpoints use `default_config`.
    pub fn new(default_config: CircuitBreakerConfig) -> Self {
        Self {
            default_config,
            breakers: DashMap::new(),
            configs: DashMap::new(),
            stats: DashMap::new(),
        }
    }

    /// Fetch the breaker for `endpoint`, building it on first reference.
    ///
    /// Construction is idempotent per key: concurrent first accesses race
    /// on the map entry, and exactly one breaker wins and is shared.
    pub fn get_or_create(&self, endpoint: &str) -> Arc<CircuitBreaker> {
        if let Some(breaker) = self.breakers.get(endpoint) {
            return breaker.clone();
        }

        self.breakers
            .entry(endpoint.to_string())
            .or_insert_with(|| {
                let config = self
                    .configs
                    .get(endpoint)
                    .map(|c| c.clone())
                    .unwrap_or_else(|| self.default_config.clone());
                Arc::new(CircuitBreaker::new(config))
            })
            .clone()
    }

    /// Register per-endpoint tuning.
    ///
    /// Only affects breakers not yet constructed for that key; once a
    /// breaker exists its config is immutable.
    pub fn register_config(&self, endpoint: &str, config: CircuitBreakerConfig) {
        self.configs.insert(endpoint.to_string(), config);
    }

    /// Run `op` through the endpoint's breaker and update call stats.
    pub async fn execute<F, Fut, T, E>(&self, endpoint: &str, op: F) -> OperationResult<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        // Clone the Arc out so no map guard is held across the await.
        let breaker = self.get_or_create(endpoint);
        let result = breaker.execute(op).await;
        self.record_outcome(endpoint, &result, breaker.state());
        result
    }

    fn record_outcome<T, E>(
        &self,
        endpoint: &str,
        result: &OperationResult<T, E>,
        state: CircuitState,
    ) {
        let previous = {
            let mut entry = self
                .stats
                .entry(endpoint.to_string())
                .or_insert_with(EndpointStats::new);
            let previous = entry.last_state;
            entry.total_calls += 1;
            if result.is_failure() {
                entry.total_failures += 1;
            }
            if result.is_success() {
                entry.total_successes += 1;
            }
            entry.last_state = state;
            previous
        };

        if previous != state {
            tracing::info!(endpoint, from = %previous, to = %state, "circuit state changed");
            metrics::record_state_change(endpoint, state);
        }
        if matches!(result, OperationResult::CircuitOpen) {
            tracing::debug!(endpoint, "call rejected, circuit open");
            metrics::record_circuit_rejection(endpoint);
        }
    }

    // --- Query surface (read-only snapshots) ---

    /// Current state for one endpoint, if its breaker exists.
    pub fn state(&self, endpoint: &str) -> Option<CircuitState> {
        self.breakers.get(endpoint).map(|b| b.state())
    }

    /// Current state of every known breaker.
    pub fn all_states(&self) -> HashMap<String, CircuitState> {
        self.breakers
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().state()))
            .collect()
    }

    /// Cumulative stats for one endpoint.
    pub fn stats(&self, endpoint: &str) -> Option<EndpointStats> {
        self.stats.get(endpoint).map(|s| s.clone())
    }

    /// Cumulative stats for every endpoint that has been called.
    pub fn all_stats(&self) -> HashMap<String, EndpointStats> {
        self.stats
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Endpoints whose circuit is currently open.
    pub fn open_circuits(&self) -> Vec<String> {
        self.circuits_in(CircuitState::Open)
    }

    /// Endpoints whose circuit is currently half-open.
    pub fn half_open_circuits(&self) -> Vec<String> {
        self.circuits_in(CircuitState::HalfOpen)
    }

    /// Endpoints whose circuit is currently closed.
    pub fn closed_circuits(&self) -> Vec<String> {
        self.circuits_in(CircuitState::Closed)
    }

    fn circuits_in(&self, state: CircuitState) -> Vec<String> {
        self.breakers
            .iter()
            .filter(|entry| entry.value().state() == state)
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// `total_failures / total_calls`; 0.0 when the endpoint has no calls.
    pub fn failure_rate(&self, endpoint: &str) -> f64 {
        self.stats
            .get(endpoint)
            .map(|s| s.failure_rate())
            .unwrap_or(0.0)
    }

    /// Failure rate for every endpoint that has stats.
    pub fn all_failure_rates(&self) -> HashMap<String, f64> {
        self.stats
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().failure_rate()))
            .collect()
    }

    // --- Lifecycle ---

    /// Drop the endpoint's breaker and stats; the next access recreates
    /// them fresh. A registered config survives and keeps applying.
    pub fn reset_endpoint(&self, endpoint: &str) {
        self.breakers.remove(endpoint);
        self.stats.remove(endpoint);
    }

    /// Drop every breaker and all stats.
    pub fn reset_all(&self) {
        self.breakers.clear();
        self.stats.clear();
    }

    /// Remove the endpoint entirely: breaker, stats, and registered config.
    pub fn unregister_endpoint(&self, endpoint: &str) {
        self.breakers.remove(endpoint);
        self.configs.remove(endpoint);
        self.stats.remove(endpoint);
    }
}
