//! WebSocket connection management, heartbeat health loop, and broadcasting.

pub mod connection;
pub mod registry;
pub mod session;
