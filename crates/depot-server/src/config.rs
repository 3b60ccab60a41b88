//! Server configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the Depot server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `0` for auto-assign).
    pub port: u16,
    /// Number of random assets seeded at startup.
    pub seed_assets: usize,
    /// Period of the mutation driver and SSE cadence, in seconds.
    pub mutation_interval_secs: u64,
    /// Bounded wait of the per-connection receive loop, in milliseconds.
    pub receive_timeout_ms: u64,
    /// Outbound message buffer per WebSocket connection.
    pub send_buffer: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            seed_assets: 10,
            mutation_interval_secs: 10,
            receive_timeout_ms: 1_000,
            send_buffer: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_host() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.host, "127.0.0.1");
    }

    #[test]
    fn default_port_is_zero() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 0);
    }

    #[test]
    fn default_seed_assets() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.seed_assets, 10);
    }

    #[test]
    fn default_mutation_interval() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.mutation_interval_secs, 10);
    }

    #[test]
    fn default_receive_timeout() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.receive_timeout_ms, 1_000);
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = ServerConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ServerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.host, cfg.host);
        assert_eq!(back.port, cfg.port);
        assert_eq!(back.seed_assets, cfg.seed_assets);
        assert_eq!(back.mutation_interval_secs, cfg.mutation_interval_secs);
        assert_eq!(back.receive_timeout_ms, cfg.receive_timeout_ms);
        assert_eq!(back.send_buffer, cfg.send_buffer);
    }

    #[test]
    fn deserialize_from_json_string() {
        let json = r#"{"host":"0.0.0.0","port":8000,"seed_assets":3,"mutation_interval_secs":2,"receive_timeout_ms":500,"send_buffer":8}"#;
        let cfg: ServerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.seed_assets, 3);
        assert_eq!(cfg.mutation_interval_secs, 2);
    }
}
