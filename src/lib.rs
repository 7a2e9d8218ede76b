//! Network Resilience Control Plane
//!
//! Per-endpoint circuit breaking, retry budgeting, and deadline tiers for
//! callers that talk to flaky remote dependencies. This crate owns the
//! decision logic only; the actual transport call is supplied by the caller
//! as an async operation that reports plain success or failure.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌─────────────────────────────────────────────────────┐
//!                 │              RESILIENCE CONTROL PLANE               │
//!                 │                                                     │
//!  endpoint key   │  ┌──────────────┐        ┌─────────────────────┐    │
//!  + async op ────┼─▶│   timeout    │───────▶│      registry       │    │
//!                 │  │ tier/deadline│        │ per-endpoint breaker│    │
//!                 │  └──────┬───────┘        │   + call stats      │    │
//!                 │         │                └──────────┬──────────┘    │
//!                 │         ▼                           ▼               │
//!                 │  ┌──────────────┐        ┌─────────────────────┐    │
//!  tagged result  │  │ metric ring  │        │   circuit breaker   │    │
//!  ◀──────────────┼──│ bounded log  │        │ Closed/Open/HalfOpen│    │
//!                 │  └──────────────┘        └──────────┬──────────┘    │
//!                 │                                     │               │
//!                 │              on Failure             ▼               │
//!                 │            ┌─────────────────────────────────┐      │
//!                 │            │   retry (budget + backoff)      │      │
//!                 │            │   caller loop / run_with_retry  │      │
//!                 │            └─────────────────────────────────┘      │
//!                 └─────────────────────────────────────────────────────┘
//! ```
//!
//! Typical composition: wrap the call with [`TimeoutManager::with_timeout`],
//! execute inside it through [`CircuitBreakerRegistry::execute`], and on
//! `Failure` consult a [`RetryBudget`] (or use [`retry::run_with_retry`])
//! until success or the budget is exhausted.

// Core state machines
pub mod breaker;
pub mod registry;

// Retry pacing and deadline policy
pub mod retry;
pub mod timeout;

// Cross-cutting concerns
pub mod config;
pub mod observability;
pub mod outcome;

pub use breaker::{CircuitBreaker, CircuitState};
pub use config::{CircuitBreakerConfig, ResilienceConfig, RetryConfig, TimeoutPolicyConfig};
pub use outcome::OperationResult;
pub use registry::{CircuitBreakerRegistry, EndpointStats};
pub use retry::{RetryBudget, RetryBudgetExhausted, RetryMetrics};
pub use timeout::{TimeoutConfig, TimeoutManager, TimeoutProfile, TimeoutStats};
