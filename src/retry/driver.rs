//! Retry loop driver.
//!
//! The budget itself never sleeps or re-attempts; this is the
//! caller-orchestrated loop, packaged. Callers with special pacing needs
//! can run their own loop against [`RetryBudget`] directly.

use std::future::Future;

use thiserror::Error;
use tokio::time::Instant;

use crate::retry::budget::{RetryBudget, RetryBudgetExhausted};

/// Terminal result of a retry sequence that never succeeded.
#[derive(Debug, Error)]
#[error("{budget}")]
pub struct RetryError<E> {
    /// The exhaustion condition that ended the loop.
    pub budget: RetryBudgetExhausted,
    /// Failure from the final attempt.
    pub last_error: E,
}

/// Run `op`, retrying on failure until it succeeds or the budget is
/// exhausted.
///
/// The first try is free; each retry draws on the budget's attempt and
/// time ceilings, sleeps the computed backoff, and is recorded against the
/// budget's metrics.
pub async fn run_with_retry<F, Fut, T, E>(budget: &RetryBudget, mut op: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Debug,
{
    let started = Instant::now();

    let mut last_error = match op().await {
        Ok(value) => return Ok(value),
        Err(error) => error,
    };

    let mut retries: u32 = 0;
    loop {
        let elapsed = started.elapsed();
        if !budget.can_retry(retries, elapsed) {
            let exhausted = RetryBudgetExhausted {
                elapsed_ms: elapsed.as_millis() as u64,
                max_ms: budget.config().max_total_retry_duration_ms,
            };
            tracing::warn!(
                retries,
                elapsed_ms = exhausted.elapsed_ms,
                last_error = ?last_error,
                "retry budget exhausted"
            );
            return Err(RetryError {
                budget: exhausted,
                last_error,
            });
        }

        retries += 1;
        let delay = budget.calculate_delay(retries);
        tokio::time::sleep(delay).await;

        match op().await {
            Ok(value) => {
                budget.record_retry(delay, true);
                return Ok(value);
            }
            Err(error) => {
                budget.record_retry(delay, false);
                tracing::debug!(retry = retries, error = ?error, "retry attempt failed");
                last_error = error;
            }
        }
    }
}
