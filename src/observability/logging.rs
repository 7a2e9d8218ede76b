//! Structured logging setup.
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Log level configurable via `RUST_LOG`
//! - Safe to call more than once (later calls are no-ops)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install an EnvFilter-driven fmt subscriber.
///
/// Library consumers that already install their own subscriber can skip
/// this; it exists so examples and tests get readable output with one call.
pub fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resilience_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
