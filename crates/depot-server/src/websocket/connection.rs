//! Per-connection WebSocket state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use depot_core::{ConnectionId, RealtimeMessage};
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// A connected WebSocket client.
///
/// All state here is ephemeral and private to this connection: the heartbeat
/// baseline starts unset and the message counter starts at zero on every
/// fresh handshake.
pub struct ClientConnection {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// Send channel to the connection's WebSocket write task.
    tx: mpsc::Sender<Arc<String>>,
    /// When this connection was established.
    pub connected_at: Instant,
    /// When the previous heartbeat arrived. `None` until the first ping.
    last_heartbeat: Mutex<Option<Instant>>,
    /// Messages received from the client (pings and echoes, not timeouts).
    message_count: AtomicU64,
}

impl ClientConnection {
    /// Create a new connection.
    pub fn new(id: ConnectionId, tx: mpsc::Sender<Arc<String>>) -> Self {
        Self {
            id,
            tx,
            connected_at: Instant::now(),
            last_heartbeat: Mutex::new(None),
            message_count: AtomicU64::new(0),
        }
    }

    /// Enqueue a pre-serialized text frame to the client.
    ///
    /// Returns `false` if the channel is full or closed; the caller decides
    /// whether that means pruning the connection.
    pub fn send(&self, message: Arc<String>) -> bool {
        self.tx.try_send(message).is_ok()
    }

    /// Serialize a realtime message and enqueue it.
    pub fn send_message(&self, message: &RealtimeMessage) -> bool {
        match serde_json::to_string(message) {
            Ok(json) => self.send(Arc::new(json)),
            Err(_) => false,
        }
    }

    /// Record a heartbeat and return the inter-ping latency in milliseconds.
    ///
    /// The first heartbeat has no baseline and reports 0 — unknown cadence
    /// is treated as healthy, not as a fault.
    pub fn record_heartbeat(&self) -> u64 {
        let now = Instant::now();
        let mut last = self.last_heartbeat.lock();
        let latency_ms = last.map_or(0, |prev| {
            u64::try_from(now.duration_since(prev).as_millis()).unwrap_or(u64::MAX)
        });
        *last = Some(now);
        latency_ms
    }

    /// Increment the message counter and return the running count.
    pub fn bump_messages(&self) -> u64 {
        self.message_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Messages received on this connection so far.
    #[must_use]
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::Relaxed)
    }

    /// Whether a heartbeat has ever been recorded.
    #[must_use]
    pub fn has_heartbeat(&self) -> bool {
        self.last_heartbeat.lock().is_some()
    }

    /// Connection age.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.connected_at.elapsed()
    }
}
