//! `DepotServer` — Axum HTTP + WebSocket + SSE server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::health::{self, HealthResponse};
use crate::mutator::run_mutation_loop;
use crate::routes;
use crate::shutdown::ShutdownCoordinator;
use crate::sse;
use crate::store::AssetStore;
use crate::websocket::registry::ConnectionRegistry;
use crate::websocket::session::ws_handler;

/// Shared state accessible from Axum handlers.
///
/// Explicitly owned and injected at startup — lifecycle is tied to the
/// server process, never ambient globals.
#[derive(Clone)]
pub struct AppState {
    /// The asset catalog.
    pub store: Arc<AssetStore>,
    /// Registered realtime connections.
    pub registry: Arc<ConnectionRegistry>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// When the server started.
    pub start_time: Instant,
}

/// The main Depot server.
pub struct DepotServer {
    config: Arc<ServerConfig>,
    store: Arc<AssetStore>,
    registry: Arc<ConnectionRegistry>,
    shutdown: Arc<ShutdownCoordinator>,
    start_time: Instant,
}

impl DepotServer {
    /// Create a new server and seed the catalog.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let store = Arc::new(AssetStore::new());
        store.seed(config.seed_assets);
        Self {
            config: Arc::new(config),
            store,
            registry: Arc::new(ConnectionRegistry::new()),
            shutdown: Arc::new(ShutdownCoordinator::new()),
            start_time: Instant::now(),
        }
    }

    fn state(&self) -> AppState {
        AppState {
            store: self.store.clone(),
            registry: self.registry.clone(),
            config: self.config.clone(),
            start_time: self.start_time,
        }
    }

    /// Build the Axum router with all routes.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/", get(routes::root))
            .route(
                "/api/assets",
                get(routes::list_assets).post(routes::create_asset),
            )
            .route("/api/assets/stream", get(sse::stream_assets))
            .route(
                "/api/assets/{id}",
                get(routes::get_asset)
                    .put(routes::update_asset)
                    .delete(routes::delete_asset),
            )
            .route("/ws", get(ws_handler))
            .route("/health", get(health_handler))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state())
    }

    /// Bind the configured address, start the mutation driver, and serve.
    ///
    /// Returns the bound address (useful with port 0) and the serve task
    /// handle; the task exits after the shutdown coordinator fires.
    pub async fn listen(&self) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let listener =
            tokio::net::TcpListener::bind(format!("{}:{}", self.config.host, self.config.port))
                .await?;
        let addr = listener.local_addr()?;
        let app = self.router();

        drop(tokio::spawn(run_mutation_loop(
            self.store.clone(),
            self.registry.clone(),
            Duration::from_secs(self.config.mutation_interval_secs),
            self.shutdown.token(),
        )));

        let cancel = self.shutdown.token();
        let handle = tokio::spawn(async move {
            let serve = axum::serve(listener, app)
                .with_graceful_shutdown(async move { cancel.cancelled().await });
            if let Err(e) = serve.await {
                error!(error = %e, "server error");
            }
            info!("server stopped");
        });

        Ok((addr, handle))
    }

    /// Get the asset store.
    pub fn store(&self) -> &Arc<AssetStore> {
        &self.store
    }

    /// Get the connection registry.
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Get the shutdown coordinator.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let connections = state.registry.count().await;
    let resp = health::health_check(state.start_time, connections, state.store.len());
    Json(resp)
}
