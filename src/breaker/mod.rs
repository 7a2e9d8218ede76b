//! Circuit breaker for endpoint protection.
//!
//! # States
//! - Closed: normal operation, calls pass through
//! - Open: endpoint assumed down, calls fail fast
//! - Half-Open: testing if the endpoint recovered
//!
//! # State Transitions
//! ```text
//! Closed → Open: failure_count >= failure_threshold
//! Open → Half-Open: first call after open_timeout_ms cooldown
//! Half-Open → Closed: success_count >= success_threshold
//! Half-Open → Open: any probe failure, or probe quota exhausted
//!                   before enough successes
//! ```
//!
//! # Design Decisions
//! - Per-endpoint breaker (not global); the registry owns one per key
//! - Fail fast in Open state: rejected calls never invoke the operation
//! - Execution is fully serialized per breaker; the critical section spans
//!   state read, operation await, and state write

pub mod breaker;
pub mod state;

pub use breaker::CircuitBreaker;
pub use state::CircuitState;
