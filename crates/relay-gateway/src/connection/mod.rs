//! Connection management
//!
//! Tracks live WebSocket connections and their lifecycle states.

mod connection;
mod manager;

pub use connection::{Connection, ConnectionState};
pub use manager::ConnectionManager;
