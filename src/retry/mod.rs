//! Retry subsystem.
//!
//! # Data Flow
//! ```text
//! attempt fails:
//!     → budget.rs (can_retry? both ceilings hard: attempts AND elapsed time)
//!     → backoff.rs (exponential delay + jitter, capped)
//!     → driver.rs (sleep, re-attempt, record) — or the caller's own loop
//! ```
//!
//! # Design Decisions
//! - The budget never retries on its own; only a caller loop (or the
//!   provided driver) re-attempts
//! - Jittered backoff prevents synchronized retry storms
//! - Counters are atomics; metric snapshots are eventually consistent
//! - Exhaustion is a terminal error distinct from the operation's failure

pub mod backoff;
pub mod budget;
pub mod driver;

pub use backoff::calculate_backoff;
pub use budget::{RetryBudget, RetryBudgetExhausted, RetryMetrics};
pub use driver::{run_with_retry, RetryError};
