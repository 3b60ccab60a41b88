//! # depot
//!
//! Depot catalog server binary — wires configuration together and starts
//! the HTTP/WebSocket/SSE server.

#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use depot_server::config::ServerConfig;
use depot_server::server::DepotServer;
use tracing_subscriber::EnvFilter;

/// Depot asset catalog server.
#[derive(Parser, Debug)]
#[command(name = "depot", about = "Depot asset catalog server")]
struct Cli {
    /// Host to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind (0 for auto-assign).
    #[arg(long, default_value = "8000")]
    port: u16,

    /// Number of random assets seeded at startup.
    #[arg(long, default_value = "10")]
    seed_assets: usize,

    /// Seconds between randomized mutation cycles.
    #[arg(long, default_value = "10")]
    mutation_interval_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("depot=info,depot_server=info,tower_http=info")
        }))
        .init();

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        seed_assets: args.seed_assets,
        mutation_interval_secs: args.mutation_interval_secs,
        ..ServerConfig::default()
    };

    let server = DepotServer::new(config);
    let (addr, handle) = server.listen().await.context("Failed to bind server")?;

    tracing::info!(
        assets = server.store().len(),
        "Depot listening on http://{addr}"
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutting down...");
    server.shutdown().graceful_shutdown(vec![handle], None).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
