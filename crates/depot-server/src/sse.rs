//! Server-Sent Events sessions.
//!
//! A single-connection variant of the realtime push: each request gets its
//! own generator driven by the same mutation cadence as the WebSocket path,
//! with no shared registry. The generator is dropped when the client
//! disconnects, which ends the session.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use axum::response::IntoResponse;
use futures::Stream;
use tracing::{debug, error};

use crate::server::AppState;
use crate::store::AssetStore;

/// Serialize the full catalog for an SSE frame.
fn catalog_json(store: &AssetStore) -> String {
    serde_json::to_string(&store.list()).unwrap_or_else(|e| {
        error!(error = %e, "failed to serialize catalog for SSE");
        "[]".to_string()
    })
}

/// `GET /api/assets/stream` — stream the catalog as SSE.
///
/// Emits one initial event with the current full list, then on every
/// mutation period runs one mutation cycle and emits the updated list.
pub async fn stream_assets(State(state): State<AppState>) -> impl IntoResponse {
    let period = Duration::from_secs(state.config.mutation_interval_secs);
    debug!(period_secs = period.as_secs(), "sse session opened");

    let stream = sse_stream(state, period);
    Sse::new(stream)
}

/// The event generator backing an SSE session.
fn sse_stream(
    state: AppState,
    period: Duration,
) -> impl Stream<Item = Result<Event, Infallible>> {
    async_stream::stream! {
        yield Ok(Event::default().data(catalog_json(&state.store)));

        loop {
            tokio::time::sleep(period).await;
            let mutated = {
                let mut rng = rand::rng();
                state.store.mutate_random(&mut rng)
            };
            debug!(mutated, "sse mutation cycle");
            yield Ok(Event::default().data(catalog_json(&state.store)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_json_is_an_array() {
        let store = AssetStore::new();
        store.seed(4);
        let json = catalog_json(&store);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 4);
    }

    #[test]
    fn empty_store_serializes_to_empty_array() {
        let store = AssetStore::new();
        assert_eq!(catalog_json(&store), "[]");
    }
}
