//! # depot-core
//!
//! Foundation types for the Depot asset catalog.
//!
//! This crate provides the shared vocabulary the server crate depends on:
//!
//! - **Branded IDs**: `AssetId`, `ConnectionId` as newtypes for type safety
//! - **Assets**: the `Asset` record and the `AssetKind` closed set
//! - **Wire contract**: `RealtimeMessage` enum shared by WebSocket and SSE
//! - **Health**: `ConnectionHealth` classification from heartbeat latency
//! - **Errors**: `DepotError` hierarchy via `thiserror`
//! - **Randomization**: seeded asset generation and mutation sampling

#![deny(unsafe_code)]

pub mod asset;
pub mod errors;
pub mod health;
pub mod ids;
pub mod messages;
pub mod random;

pub use asset::{Asset, AssetKind};
pub use errors::DepotError;
pub use health::{classify_latency, ConnectionHealth};
pub use ids::{AssetId, ConnectionId};
pub use messages::RealtimeMessage;
