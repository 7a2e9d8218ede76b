//! Endpoint classification into deadline tiers.

use serde::Serialize;

/// Deadline tier, ordered Fast < Normal < Slow by duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimeoutProfile {
    /// Health and status probes; expected to answer immediately.
    Fast,
    /// Ordinary CRUD traffic and anything unrecognized.
    Normal,
    /// Long-running work such as payment initiation and confirmation.
    Slow,
}

/// Per-call deadlines for one profile. The policy repeats a single scalar
/// across all four phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeoutConfig {
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    pub write_timeout_ms: u64,
    pub total_timeout_ms: u64,
}

impl TimeoutConfig {
    /// One scalar repeated across connect/read/write/total.
    pub fn uniform(timeout_ms: u64) -> Self {
        Self {
            connect_timeout_ms: timeout_ms,
            read_timeout_ms: timeout_ms,
            write_timeout_ms: timeout_ms,
            total_timeout_ms: timeout_ms,
        }
    }
}

/// Classify an endpoint by ordered substring match; first match wins.
pub fn profile_for_endpoint(endpoint: &str) -> TimeoutProfile {
    if endpoint.contains("/health") || endpoint.contains("/status") {
        return TimeoutProfile::Fast;
    }
    if endpoint.contains("/payments/initiate") {
        return TimeoutProfile::Slow;
    }
    if endpoint.contains("/payments/") && endpoint.contains("/confirm") {
        return TimeoutProfile::Slow;
    }
    // Recognized CRUD classes and everything else share the Normal tier.
    TimeoutProfile::Normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_and_status_are_fast() {
        assert_eq!(profile_for_endpoint("/health"), TimeoutProfile::Fast);
        assert_eq!(profile_for_endpoint("/api/v1/status"), TimeoutProfile::Fast);
    }

    #[test]
    fn test_payment_initiation_and_confirmation_are_slow() {
        assert_eq!(
            profile_for_endpoint("/payments/initiate"),
            TimeoutProfile::Slow
        );
        assert_eq!(
            profile_for_endpoint("/payments/42/confirm"),
            TimeoutProfile::Slow
        );
    }

    #[test]
    fn test_plain_payments_are_normal() {
        assert_eq!(profile_for_endpoint("/payments"), TimeoutProfile::Normal);
        assert_eq!(profile_for_endpoint("/payments/42"), TimeoutProfile::Normal);
    }

    #[test]
    fn test_crud_classes_and_unknown_are_normal() {
        for endpoint in [
            "/vendors",
            "/work-orders/7",
            "/announcements",
            "/messages",
            "/community-posts",
            "/users/1",
            "/completely/unknown",
        ] {
            assert_eq!(profile_for_endpoint(endpoint), TimeoutProfile::Normal);
        }
    }

    #[test]
    fn test_first_match_wins() {
        // Health probe under the payments prefix is still Fast.
        assert_eq!(
            profile_for_endpoint("/payments/health"),
            TimeoutProfile::Fast
        );
    }

    #[test]
    fn test_uniform_config_repeats_the_scalar() {
        let config = TimeoutConfig::uniform(5_000);
        assert_eq!(config.connect_timeout_ms, 5_000);
        assert_eq!(config.read_timeout_ms, 5_000);
        assert_eq!(config.write_timeout_ms, 5_000);
        assert_eq!(config.total_timeout_ms, 5_000);
    }
}
