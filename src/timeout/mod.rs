//! Timeout subsystem.
//!
//! # Data Flow
//! ```text
//! with_timeout(endpoint, op):
//!     → profile.rs (ordered substring match → Fast/Normal/Slow tier)
//!     → tokio::time::timeout (race op against the tier deadline)
//!     → metrics.rs (bounded ring of per-call outcomes, capacity 1000)
//! ```
//!
//! # Design Decisions
//! - Every guarded call has a deadline; unrecognized endpoints get Normal
//! - Timeout is a distinct result variant, not an error
//! - Cancellation is cooperative: the timed-out future is dropped at its
//!   next suspension point; an operation that never yields keeps running
//!   after `Timeout` is returned

pub mod manager;
pub mod metrics;
pub mod profile;

pub use manager::TimeoutManager;
pub use metrics::{TimeoutMetric, TimeoutStats, TIMEOUT_LOG_CAPACITY};
pub use profile::{profile_for_endpoint, TimeoutConfig, TimeoutProfile};
