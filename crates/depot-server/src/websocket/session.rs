//! WebSocket session lifecycle — handles a single client from upgrade
//! through disconnect, running the per-connection health loop.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use depot_core::{classify_latency, ConnectionHealth, ConnectionId, RealtimeMessage};
use futures::{SinkExt, StreamExt};
use metrics::{counter, gauge, histogram};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::server::AppState;

use super::connection::ClientConnection;

/// WebSocket upgrade handler for `GET /ws`.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let conn_id = ConnectionId::new();
    ws.on_upgrade(move |socket| run_session(socket, state, conn_id))
}

/// Build the reply for an inbound text frame, or `None` when the frame is
/// ignored (empty payload).
///
/// The literal `"ping"` is the reserved heartbeat token: it records a
/// heartbeat, bumps the counter, and classifies health from inter-ping
/// latency. Anything else non-empty bumps the counter and echoes back with
/// a fixed healthy classification — echoes never feed the latency state.
fn reply_for_text(connection: &ClientConnection, text: &str) -> Option<RealtimeMessage> {
    if text == "ping" {
        let latency_ms = connection.record_heartbeat();
        let message_count = connection.bump_messages();
        Some(RealtimeMessage::Pong {
            latency_ms,
            message_count,
            connection_health: classify_latency(latency_ms),
        })
    } else if text.is_empty() {
        None
    } else {
        let message_count = connection.bump_messages();
        Some(RealtimeMessage::Echo {
            message: text.to_string(),
            message_count,
            connection_health: ConnectionHealth::Healthy,
        })
    }
}

/// Run a WebSocket session for a connected client.
///
/// 1. Registers the connection and sends the `initial` full catalog
/// 2. Forwards broadcast/reply frames via the outbound channel
/// 3. Runs a bounded-wait receive loop: heartbeats, echoes, idle probes
/// 4. Unregisters exactly once on transport disconnect
#[instrument(skip_all, fields(conn_id = %conn_id))]
pub async fn run_session(socket: WebSocket, state: AppState, conn_id: ConnectionId) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (send_tx, mut send_rx) = mpsc::channel::<Arc<String>>(state.config.send_buffer);
    let connection = Arc::new(ClientConnection::new(conn_id.clone(), send_tx));

    info!("client connected");
    counter!("ws_connections_total").increment(1);
    gauge!("ws_connections_active").increment(1.0);

    // Full catalog goes out before anything else on this socket.
    let initial = RealtimeMessage::Initial {
        data: state.store.list(),
    };
    match serde_json::to_string(&initial) {
        Ok(json) => {
            if ws_tx.send(Message::Text(json.into())).await.is_err() {
                warn!("failed to send initial catalog, dropping connection");
                gauge!("ws_connections_active").decrement(1.0);
                return;
            }
        }
        Err(e) => {
            warn!(error = %e, "failed to serialize initial catalog");
        }
    }

    state.registry.register(connection.clone()).await;

    // Outbound forwarder: drains the per-connection channel into the socket.
    let outbound = tokio::spawn(async move {
        while let Some(text) = send_rx.recv().await {
            if ws_tx.send(Message::Text(text.as_str().into())).await.is_err() {
                break;
            }
        }
    });

    let receive_timeout = Duration::from_millis(state.config.receive_timeout_ms);

    // Bounded-wait receive loop. A timeout is a normal control-flow outcome
    // (idle probe), not a failure; only transport-level events end the loop.
    loop {
        match tokio::time::timeout(receive_timeout, ws_rx.next()).await {
            // No client activity within the wait: idle probe, counter untouched.
            Err(_) => {
                let probe = RealtimeMessage::Health {
                    connection_health: ConnectionHealth::Disconnected,
                };
                if !connection.send_message(&probe) {
                    debug!("failed to enqueue idle probe, closing session");
                    break;
                }
            }
            // Stream ended: client went away.
            Ok(None) => {
                debug!("websocket stream ended");
                break;
            }
            Ok(Some(Err(e))) => {
                debug!(error = %e, "websocket receive error");
                break;
            }
            Ok(Some(Ok(msg))) => match msg {
                Message::Text(text) => {
                    if let Some(reply) = reply_for_text(&connection, text.as_str()) {
                        if !connection.send_message(&reply) {
                            debug!(kind = reply.kind(), "failed to enqueue reply");
                            break;
                        }
                    }
                }
                Message::Close(_) => {
                    info!("client sent close frame");
                    break;
                }
                Message::Binary(_) | Message::Ping(_) | Message::Pong(_) => {}
            },
        }
    }

    info!(
        messages = connection.message_count(),
        "client disconnected"
    );
    counter!("ws_disconnections_total").increment(1);
    gauge!("ws_connections_active").decrement(1.0);
    histogram!("ws_connection_duration_seconds").record(connection.age().as_secs_f64());
    outbound.abort();
    state.registry.unregister(conn_id.as_str()).await;
}
