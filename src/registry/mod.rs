//! Breaker registry subsystem.
//!
//! # Data Flow
//! ```text
//! execute(endpoint, op):
//!     → get_or_create (lazy, idempotent per key)
//!     → breaker.execute(op) (serialized per endpoint)
//!     → stats update (narrow per-entry lock, never spans the op)
//!     → state-change log + metrics on transition
//! ```
//!
//! # Design Decisions
//! - One live breaker per endpoint, even under concurrent first access
//! - Per-endpoint config is immutable once its breaker exists
//! - Stats bookkeeping never blocks on another endpoint's call
//! - Reset drops breaker and stats; the next access recreates them fresh

pub mod registry;
pub mod stats;

pub use registry::CircuitBreakerRegistry;
pub use stats::EndpointStats;
