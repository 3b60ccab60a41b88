//! Periodic mutation driver.
//!
//! On a fixed cadence, mutates a random subset of the catalog and pushes the
//! resulting full list to every registered WebSocket connection. Explicit
//! CRUD mutations deliberately do NOT broadcast — realtime pushes are tied
//! to the periodic cycle only.

use std::sync::Arc;
use std::time::Duration;

use depot_core::RealtimeMessage;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::store::AssetStore;
use crate::websocket::registry::ConnectionRegistry;

/// Run the mutation loop until cancelled.
///
/// Every `period`: run one randomized mutation cycle on the store; when
/// anything changed, broadcast the full catalog as an `update` message. An
/// empty store skips the cycle entirely — no mutation, no broadcast. No
/// per-connection failure can terminate this loop.
pub async fn run_mutation_loop(
    store: Arc<AssetStore>,
    registry: Arc<ConnectionRegistry>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Skip the immediate first tick
    let _ = ticker.tick().await;

    info!(period_secs = period.as_secs(), "mutation loop started");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let mutated = {
                    let mut rng = rand::rng();
                    store.mutate_random(&mut rng)
                };
                if mutated == 0 {
                    continue;
                }
                let update = RealtimeMessage::Update { data: store.list() };
                let delivered = registry.broadcast(&update).await;
                debug!(mutated, delivered, "mutation cycle broadcast");
            }
            () = cancel.cancelled() => {
                info!("mutation loop stopped");
                return;
            }
        }
    }
}
