//! Shared utilities for integration testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// A scripted fake dependency: fails the first `fail_first` calls, then
/// succeeds, counting every invocation.
#[derive(Debug, Default)]
pub struct ScriptedService {
    calls: Arc<AtomicU32>,
    fail_first: u32,
}

#[allow(dead_code)]
impl ScriptedService {
    pub fn failing_first(fail_first: u32) -> Self {
        Self {
            calls: Arc::new(AtomicU32::new(0)),
            fail_first,
        }
    }

    pub fn always_failing() -> Self {
        Self::failing_first(u32::MAX)
    }

    pub async fn call(&self) -> Result<u32, &'static str> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.fail_first {
            Err("service unavailable")
        } else {
            Ok(n)
        }
    }

    /// Number of times the service was actually invoked.
    pub fn invocations(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}
