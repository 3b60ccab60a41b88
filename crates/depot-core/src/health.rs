//! Connection-health classification from heartbeat timing.

use serde::{Deserialize, Serialize};

/// Inter-ping latency above which a connection is considered unstable, in
/// milliseconds.
pub const UNSTABLE_THRESHOLD_MS: u64 = 200;

/// Health of a realtime connection as reported to the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionHealth {
    /// Heartbeats arriving on time (or no baseline yet).
    Healthy,
    /// Heartbeats arriving, but slower than the threshold.
    Unstable,
    /// No client activity observed within the bounded receive wait.
    ///
    /// This is an idle-probe outcome, not a transport disconnect — the
    /// connection stays registered and may recover on the next message.
    Disconnected,
}

impl ConnectionHealth {
    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionHealth::Healthy => "healthy",
            ConnectionHealth::Unstable => "unstable",
            ConnectionHealth::Disconnected => "disconnected",
        }
    }
}

/// Classify inter-ping latency.
///
/// A latency of 0 means this was the first heartbeat — no baseline exists,
/// so the unknown is treated as healthy rather than as a fault.
#[must_use]
pub fn classify_latency(latency_ms: u64) -> ConnectionHealth {
    if latency_ms == 0 || latency_ms < UNSTABLE_THRESHOLD_MS {
        ConnectionHealth::Healthy
    } else {
        ConnectionHealth::Unstable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_heartbeat_is_healthy() {
        assert_eq!(classify_latency(0), ConnectionHealth::Healthy);
    }

    #[test]
    fn fast_heartbeat_is_healthy() {
        assert_eq!(classify_latency(50), ConnectionHealth::Healthy);
        assert_eq!(classify_latency(199), ConnectionHealth::Healthy);
    }

    #[test]
    fn slow_heartbeat_is_unstable() {
        assert_eq!(classify_latency(200), ConnectionHealth::Unstable);
        assert_eq!(classify_latency(500), ConnectionHealth::Unstable);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ConnectionHealth::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&ConnectionHealth::Unstable).unwrap(),
            "\"unstable\""
        );
        assert_eq!(
            serde_json::to_string(&ConnectionHealth::Disconnected).unwrap(),
            "\"disconnected\""
        );
    }

    #[test]
    fn as_str_matches_serde() {
        for health in [
            ConnectionHealth::Healthy,
            ConnectionHealth::Unstable,
            ConnectionHealth::Disconnected,
        ] {
            let json = serde_json::to_string(&health).unwrap();
            assert_eq!(json, format!("\"{}\"", health.as_str()));
        }
    }
}
