//! Breaker state enum.

use serde::Serialize;

/// Circuit state (0=Closed, 1=Open, 2=HalfOpen).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CircuitState {
    /// Normal operation; calls pass through and failures are counted.
    Closed = 0,
    /// Failing fast; calls are rejected until the cooldown elapses.
    Open = 1,
    /// Probing; a limited number of trial calls decide recovery or re-trip.
    HalfOpen = 2,
}

impl From<u8> for CircuitState {
    fn from(val: u8) -> Self {
        match val {
            1 => CircuitState::Open,
            2 => CircuitState::HalfOpen,
            _ => CircuitState::Closed,
        }
    }
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitState::Closed => write!(f, "closed"),
            CircuitState::Open => write!(f, "open"),
            CircuitState::HalfOpen => write!(f, "half-open"),
        }
    }
}
