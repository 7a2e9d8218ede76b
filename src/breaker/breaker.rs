//! Circuit breaker implementation.

use std::future::Future;
use std::sync::atomic::{AtomicU32, AtomicU64, AtomicU8, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::breaker::state::CircuitState;
use crate::config::CircuitBreakerConfig;
use crate::outcome::OperationResult;

/// Sentinel for "no failure recorded yet".
const NEVER: u64 = u64::MAX;

/// A 3-state circuit breaker guarding one endpoint.
///
/// `execute` is fully serialized: the internal mutex is held across state
/// lookup, the operation await, and the state update, so two concurrent
/// calls through the same breaker queue rather than interleave. This keeps
/// transitions totally ordered with real execution order (no double-trip,
/// no lost failure count) at the cost of single-endpoint throughput.
///
/// The atomic fields mirror the mutex-protected state so that read
/// accessors are cheap point-in-time snapshots for reporting. They are
/// never used to make control decisions outside the serialized path.
#[derive(Debug)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    /// Execution lock; all mutation happens while holding it.
    lock: Mutex<()>,
    /// Monotonic reference point for the cooldown clock.
    epoch: Instant,
    state: AtomicU8,
    failure_count: AtomicU32,
    success_count: AtomicU32,
    half_open_calls: AtomicU32,
    /// Millis since `epoch` of the most recent failure, or `NEVER`.
    last_failure_ms: AtomicU64,
}

impl CircuitBreaker {
    /// Create a breaker with the given tuning.
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            lock: Mutex::new(()),
            epoch: Instant::now(),
            state: AtomicU8::new(CircuitState::Closed as u8),
            failure_count: AtomicU32::new(0),
            success_count: AtomicU32::new(0),
            half_open_calls: AtomicU32::new(0),
            last_failure_ms: AtomicU64::new(NEVER),
        }
    }

    /// Create a breaker with default tuning.
    pub fn with_defaults() -> Self {
        Self::new(CircuitBreakerConfig::default())
    }

    /// Run `op` under the breaker, or fail fast if the circuit is open.
    pub async fn execute<F, Fut, T, E>(&self, op: F) -> OperationResult<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let _guard = self.lock.lock().await;

        match self.state() {
            CircuitState::Open => {
                if !self.cooldown_elapsed() {
                    return OperationResult::CircuitOpen;
                }
                // Cooldown over: probe with this call as the first half-open
                // attempt.
                self.enter_half_open();
                self.attempt(op).await
            }
            CircuitState::Closed | CircuitState::HalfOpen => self.attempt(op).await,
        }
    }

    /// Force the breaker Closed with all counters zeroed, regardless of
    /// current state. Operational/test override; takes the execution lock.
    pub async fn reset(&self) {
        let _guard = self.lock.lock().await;
        self.reset_to_closed();
        self.last_failure_ms.store(NEVER, Ordering::Relaxed);
    }

    // --- Snapshot accessors (reporting only) ---

    /// Current state.
    pub fn state(&self) -> CircuitState {
        CircuitState::from(self.state.load(Ordering::Relaxed))
    }

    /// Consecutive failures observed while Closed.
    pub fn failure_count(&self) -> u32 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Successful probes in the current HalfOpen episode.
    pub fn success_count(&self) -> u32 {
        self.success_count.load(Ordering::Relaxed)
    }

    /// Probe calls admitted in the current HalfOpen episode.
    pub fn half_open_calls(&self) -> u32 {
        self.half_open_calls.load(Ordering::Relaxed)
    }

    /// Time since the most recent failure, if any.
    pub fn last_failure_age(&self) -> Option<Duration> {
        match self.last_failure_ms.load(Ordering::Relaxed) {
            NEVER => None,
            ms => Some(Duration::from_millis(self.now_ms().saturating_sub(ms))),
        }
    }

    /// Tuning this breaker was built with.
    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    // --- Internals; callers hold the execution lock ---

    async fn attempt<F, Fut, T, E>(&self, op: F) -> OperationResult<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match op().await {
            Ok(value) => {
                self.on_success();
                OperationResult::Success(value)
            }
            Err(error) => {
                self.on_failure();
                OperationResult::Failure(error)
            }
        }
    }

    fn on_success(&self) {
        match self.state() {
            CircuitState::Closed => {
                self.failure_count.store(0, Ordering::Relaxed);
            }
            CircuitState::HalfOpen => {
                let calls = self.half_open_calls.fetch_add(1, Ordering::Relaxed) + 1;
                let successes = self.success_count.fetch_add(1, Ordering::Relaxed) + 1;

                if successes >= self.config.success_threshold {
                    self.reset_to_closed();
                    tracing::debug!(successes, "circuit closed after successful probes");
                } else if calls >= self.config.half_open_max_calls {
                    // Probe quota exhausted before enough successes:
                    // insufficient evidence, back to Open.
                    self.trip_to_open();
                    tracing::debug!(calls, successes, "circuit re-opened, probe quota exhausted");
                }
            }
            CircuitState::Open => {}
        }
    }

    fn on_failure(&self) {
        self.last_failure_ms.store(self.now_ms(), Ordering::Relaxed);

        match self.state() {
            CircuitState::Closed => {
                let failures = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
                if failures >= self.config.failure_threshold {
                    self.trip_to_open();
                    tracing::debug!(failures, "circuit tripped open");
                }
            }
            CircuitState::HalfOpen => {
                // A single failed probe aborts recovery.
                self.trip_to_open();
                tracing::debug!("circuit re-opened, probe failed");
            }
            CircuitState::Open => {}
        }
    }

    fn cooldown_elapsed(&self) -> bool {
        match self.last_failure_ms.load(Ordering::Relaxed) {
            NEVER => true,
            ms => self.now_ms().saturating_sub(ms) >= self.config.open_timeout_ms,
        }
    }

    fn enter_half_open(&self) {
        self.state.store(CircuitState::HalfOpen as u8, Ordering::Relaxed);
        self.success_count.store(0, Ordering::Relaxed);
        self.half_open_calls.store(0, Ordering::Relaxed);
    }

    fn trip_to_open(&self) {
        self.state.store(CircuitState::Open as u8, Ordering::Relaxed);
        self.failure_count.store(0, Ordering::Relaxed);
        self.success_count.store(0, Ordering::Relaxed);
        self.half_open_calls.store(0, Ordering::Relaxed);
    }

    fn reset_to_closed(&self) {
        self.state.store(CircuitState::Closed as u8, Ordering::Relaxed);
        self.failure_count.store(0, Ordering::Relaxed);
        self.success_count.store(0, Ordering::Relaxed);
        self.half_open_calls.store(0, Ordering::Relaxed);
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::with_defaults()
    }
}
