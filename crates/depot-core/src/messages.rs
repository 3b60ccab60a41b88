//! Realtime wire contract shared by the WebSocket and SSE paths.

use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::health::ConnectionHealth;

/// Messages pushed to realtime clients.
///
/// The serialized `type` tag and field names are a stable contract; existing
/// frontends switch on `type` and read `data` for catalog payloads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RealtimeMessage {
    /// Full catalog sent once on connection establishment.
    Initial {
        /// Every asset currently in the store.
        data: Vec<Asset>,
    },

    /// Full catalog sent after a periodic mutation cycle.
    Update {
        /// Every asset currently in the store.
        data: Vec<Asset>,
    },

    /// Reply to a client heartbeat (`"ping"` text frame).
    Pong {
        /// Milliseconds since this connection's previous heartbeat
        /// (0 for the first).
        latency_ms: u64,
        /// Messages received on this connection so far.
        message_count: u64,
        /// Latency-based classification.
        connection_health: ConnectionHealth,
    },

    /// Reply to any other non-empty client text frame.
    Echo {
        /// The original payload, returned verbatim.
        message: String,
        /// Messages received on this connection so far.
        message_count: u64,
        /// Always healthy — echoes do not participate in latency tracking.
        connection_health: ConnectionHealth,
    },

    /// Idle probe emitted when no client activity arrived within the
    /// bounded receive wait.
    Health {
        /// Always [`ConnectionHealth::Disconnected`].
        connection_health: ConnectionHealth,
    },
}

impl RealtimeMessage {
    /// The wire tag of this message.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            RealtimeMessage::Initial { .. } => "initial",
            RealtimeMessage::Update { .. } => "update",
            RealtimeMessage::Pong { .. } => "pong",
            RealtimeMessage::Echo { .. } => "echo",
            RealtimeMessage::Health { .. } => "health",
        }
    }
}
