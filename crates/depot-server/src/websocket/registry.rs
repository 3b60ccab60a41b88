//! Connection registry and catalog fan-out to connected WebSocket clients.

use std::collections::HashMap;
use std::sync::Arc;

use depot_core::RealtimeMessage;
use metrics::counter;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::connection::ClientConnection;

/// Tracks the set of open realtime connections and fans catalog updates
/// out to all of them.
pub struct ConnectionRegistry {
    /// Connected clients indexed by connection ID.
    connections: RwLock<HashMap<String, Arc<ClientConnection>>>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Add a connection.
    pub async fn register(&self, connection: Arc<ClientConnection>) {
        let mut conns = self.connections.write().await;
        let _ = conns.insert(connection.id.to_string(), connection);
    }

    /// Remove a connection by ID. Safe to call more than once — the second
    /// call is a no-op.
    pub async fn unregister(&self, connection_id: &str) {
        let mut conns = self.connections.write().await;
        let _ = conns.remove(connection_id);
    }

    /// Number of active connections.
    pub async fn count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Stable copy of the current connections, safe to iterate while other
    /// connections register or drop.
    pub async fn snapshot(&self) -> Vec<Arc<ClientConnection>> {
        self.connections.read().await.values().cloned().collect()
    }

    /// Deliver a message to every registered connection.
    ///
    /// The message is serialized exactly once and shared across deliveries.
    /// A failed delivery marks that connection for removal and never
    /// affects delivery to the rest; every failure is unregistered after
    /// the pass. Returns the number of successful deliveries.
    pub async fn broadcast(&self, message: &RealtimeMessage) -> usize {
        let json = match serde_json::to_string(message) {
            Ok(j) => Arc::new(j),
            Err(e) => {
                warn!(kind = message.kind(), error = %e, "failed to serialize broadcast");
                return 0;
            }
        };

        let snapshot = self.snapshot().await;
        let mut delivered = 0;
        let mut failed = Vec::new();
        for conn in &snapshot {
            if conn.send(Arc::clone(&json)) {
                delivered += 1;
            } else {
                counter!("ws_broadcast_failures_total").increment(1);
                failed.push(conn.id.to_string());
            }
        }
        debug!(
            kind = message.kind(),
            recipients = snapshot.len(),
            delivered,
            "broadcast cycle"
        );

        if !failed.is_empty() {
            let mut conns = self.connections.write().await;
            for id in &failed {
                if conns.remove(id).is_some() {
                    warn!(conn_id = %id, "pruned connection after failed delivery");
                }
            }
        }
        delivered
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::{Asset, AssetId, AssetKind, ConnectionId};
    use tokio::sync::mpsc;

    fn make_connection(id: &str) -> (Arc<ClientConnection>, mpsc::Receiver<Arc<String>>) {
        make_connection_with_buffer(id, 32)
    }

    fn make_connection_with_buffer(
        id: &str,
        buffer: usize,
    ) -> (Arc<ClientConnection>, mpsc::Receiver<Arc<String>>) {
        let (tx, rx) = mpsc::channel(buffer);
        let conn = Arc::new(ClientConnection::new(ConnectionId::from(id), tx));
        (conn, rx)
    }

    fn update_message() -> RealtimeMessage {
        let asset =
            Asset::new(AssetId::from("a1"), "Vehicle_Model", AssetKind::Glb).unwrap();
        RealtimeMessage::Update { data: vec![asset] }
    }

    #[tokio::test]
    async fn register_connection() {
        let registry = ConnectionRegistry::new();
        let (conn, _rx) = make_connection("c1");
        registry.register(conn).await;
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn unregister_connection() {
        let registry = ConnectionRegistry::new();
        let (conn, _rx) = make_connection("c1");
        registry.register(conn).await;
        registry.unregister("c1").await;
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn unregister_is_idempotent() {
        let registry = ConnectionRegistry::new();
        let (conn, _rx) = make_connection("c1");
        registry.register(conn).await;
        registry.unregister("c1").await;
        // Second call is a no-op, not a panic
        registry.unregister("c1").await;
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn unregister_nonexistent() {
        let registry = ConnectionRegistry::new();
        registry.unregister("no_such").await;
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn broadcast_reaches_all_connections() {
        let registry = ConnectionRegistry::new();
        let (c1, mut rx1) = make_connection("c1");
        let (c2, mut rx2) = make_connection("c2");
        registry.register(c1).await;
        registry.register(c2).await;

        let delivered = registry.broadcast(&update_message()).await;
        assert_eq!(delivered, 2);
        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_ok());
    }

    #[tokio::test]
    async fn broadcast_to_empty_registry() {
        let registry = ConnectionRegistry::new();
        // Should not panic
        assert_eq!(registry.broadcast(&update_message()).await, 0);
    }

    #[tokio::test]
    async fn broadcast_serializes_once() {
        let registry = ConnectionRegistry::new();
        let (c1, mut rx1) = make_connection("c1");
        let (c2, mut rx2) = make_connection("c2");
        registry.register(c1).await;
        registry.register(c2).await;

        let _ = registry.broadcast(&update_message()).await;
        let msg1 = rx1.recv().await.unwrap();
        let msg2 = rx2.recv().await.unwrap();
        // Both receivers share the same serialization
        assert!(Arc::ptr_eq(&msg1, &msg2));
        assert_eq!(&*msg1, &*msg2);
    }

    #[tokio::test]
    async fn broadcast_payloads_are_identical_across_cycles() {
        let registry = ConnectionRegistry::new();
        let (c1, mut rx1) = make_connection("c1");
        let (c2, mut rx2) = make_connection("c2");
        registry.register(c1).await;
        registry.register(c2).await;

        let message = update_message();
        for _ in 0..3 {
            let _ = registry.broadcast(&message).await;
        }
        for _ in 0..3 {
            let a = rx1.recv().await.unwrap();
            let b = rx2.recv().await.unwrap();
            assert_eq!(&*a, &*b);
        }
        // Exactly three update events each, no extras
        assert!(rx1.try_recv().is_err());
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn failed_delivery_prunes_connection() {
        let registry = ConnectionRegistry::new();
        let (tx, rx) = mpsc::channel(32);
        let dead = Arc::new(ClientConnection::new(ConnectionId::from("dead"), tx));
        drop(rx); // closed channel: every send fails
        let (live, mut live_rx) = make_connection("live");
        registry.register(dead).await;
        registry.register(live).await;

        let delivered = registry.broadcast(&update_message()).await;

        // The bad connection never reduced delivery to the good one
        assert_eq!(delivered, 1);
        assert!(live_rx.try_recv().is_ok());
        // Absent from the registry by the next cycle
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn full_channel_prunes_connection() {
        let registry = ConnectionRegistry::new();
        let (slow, _slow_rx) = make_connection_with_buffer("slow", 1);
        let (fast, mut fast_rx) = make_connection("fast");
        registry.register(slow).await;
        registry.register(fast).await;

        // First cycle fills the slow client's buffer
        let _ = registry.broadcast(&update_message()).await;
        assert_eq!(registry.count().await, 2);
        // Second cycle fails for the slow client and prunes it
        let _ = registry.broadcast(&update_message()).await;
        assert_eq!(registry.count().await, 1);
        assert!(fast_rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn snapshot_is_stable_copy() {
        let registry = ConnectionRegistry::new();
        let (c1, _rx1) = make_connection("c1");
        registry.register(c1).await;

        let snapshot = registry.snapshot().await;
        registry.unregister("c1").await;
        // The snapshot still holds the connection even though the registry
        // no longer does
        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn register_same_id_replaces() {
        let registry = ConnectionRegistry::new();
        let (c1, _rx1) = make_connection("same");
        let (c2, mut rx2) = make_connection("same");
        registry.register(c1).await;
        registry.register(c2).await;
        assert_eq!(registry.count().await, 1);

        let _ = registry.broadcast(&update_message()).await;
        assert!(rx2.try_recv().is_ok());
    }

    #[tokio::test]
    async fn default_registry_is_empty() {
        let registry = ConnectionRegistry::default();
        assert_eq!(registry.count().await, 0);
    }
}
