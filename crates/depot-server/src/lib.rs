//! # depot-server
//!
//! Axum HTTP + `WebSocket` + SSE server for the Depot asset catalog.
//!
//! - CRUD endpoints over an in-memory asset store
//! - `WebSocket` gateway: connection registry, broadcast fan-out, and a
//!   per-connection heartbeat health loop
//! - SSE sessions driven by the same mutation cadence
//! - Periodic mutation driver that pushes full-catalog updates
//! - Graceful shutdown via `tokio::signal` + `CancellationToken`

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod health;
pub mod mutator;
pub mod routes;
pub mod server;
pub mod shutdown;
pub mod sse;
pub mod store;
pub mod websocket;
