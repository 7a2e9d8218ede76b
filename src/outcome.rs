//! Tagged call outcomes.
//!
//! # Design Decisions
//! - `CircuitOpen` and `Timeout` are expected, frequent control-flow values,
//!   not errors; callers branch on them explicitly
//! - One sum type is shared by the breaker (`Success`/`Failure`/`CircuitOpen`)
//!   and the timeout wrapper (`Success`/`Timeout` substitution on expiry)

use std::time::Duration;

/// Outcome of a guarded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult<T, E> {
    /// The operation ran and reported success.
    Success(T),
    /// The operation ran and reported failure.
    Failure(E),
    /// The breaker rejected the call without running the operation.
    CircuitOpen,
    /// The deadline expired; carries the configured deadline, not the
    /// elapsed time.
    Timeout(Duration),
}

impl<T, E> OperationResult<T, E> {
    /// True for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success(_))
    }

    /// True for `Failure`.
    pub fn is_failure(&self) -> bool {
        matches!(self, OperationResult::Failure(_))
    }

    /// True for `CircuitOpen` or `Timeout` (the call never produced a
    /// verdict from the operation itself).
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            OperationResult::CircuitOpen | OperationResult::Timeout(_)
        )
    }

    /// Extract the success value, if any.
    pub fn success(self) -> Option<T> {
        match self {
            OperationResult::Success(v) => Some(v),
            _ => None,
        }
    }

    /// Map the success value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationResult<U, E> {
        match self {
            OperationResult::Success(v) => OperationResult::Success(f(v)),
            OperationResult::Failure(e) => OperationResult::Failure(e),
            OperationResult::CircuitOpen => OperationResult::CircuitOpen,
            OperationResult::Timeout(d) => OperationResult::Timeout(d),
        }
    }
}

impl<T, E> From<Result<T, E>> for OperationResult<T, E> {
    fn from(res: Result<T, E>) -> Self {
        match res {
            Ok(v) => OperationResult::Success(v),
            Err(e) => OperationResult::Failure(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok: OperationResult<u32, &str> = Ok(7).into();
        assert_eq!(ok, OperationResult::Success(7));

        let err: OperationResult<u32, &str> = Err("boom").into();
        assert_eq!(err, OperationResult::Failure("boom"));
    }

    #[test]
    fn test_predicates() {
        let open: OperationResult<(), ()> = OperationResult::CircuitOpen;
        assert!(open.is_rejected());
        assert!(!open.is_success());

        let timeout: OperationResult<(), ()> =
            OperationResult::Timeout(Duration::from_millis(250));
        assert!(timeout.is_rejected());
        assert!(!timeout.is_failure());
    }

    #[test]
    fn test_map_preserves_variant() {
        let r: OperationResult<u32, ()> = OperationResult::Success(2);
        assert_eq!(r.map(|v| v * 10), OperationResult::Success(20));

        let t: OperationResult<u32, ()> = OperationResult::Timeout(Duration::from_secs(1));
        assert_eq!(t.map(|v| v * 10), OperationResult::Timeout(Duration::from_secs(1)));
    }
}
