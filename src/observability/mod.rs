//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! breaker / registry / timeout / retry produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (named counters via the metrics facade)
//!
//! Consumers:
//!     → Log aggregation (stdout, file, remote)
//!     → Whatever metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Metrics are cheap (atomic increments behind the facade)
//! - No exporter here; exposition belongs to the embedding application
//! - This crate only supplies diagnostic data, never user-facing messages

pub mod logging;
pub mod metrics;
