//! # relay-gateway
//!
//! WebSocket gateway that tracks user presence and relays transient
//! events (chat messages, read receipts, call signaling) between
//! connected peers. Best-effort, single hop, no queues.

pub mod broadcast;
pub mod connection;
pub mod handlers;
pub mod protocol;
pub mod registry;
pub mod server;

pub use server::{create_app, run, GatewayState};
