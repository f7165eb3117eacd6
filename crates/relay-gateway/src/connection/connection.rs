//! Individual WebSocket connection
//!
//! Represents a single WebSocket connection and its state. The outbound
//! mpsc sender is the connection handle relays deliver to; it is valid
//! only while the connection's writer task is alive.

use crate::protocol::{ServerEvent, UserId};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, RwLock};

/// Connection lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Handle open, no identity registered yet (or signed out again)
    Connected,
    /// Bound to one identity in the presence registry
    Registered,
    /// Terminal; the transport is gone
    Closed,
}

/// A single WebSocket connection
pub struct Connection {
    /// Unique session ID
    session_id: String,

    /// Identity this connection registered (None until add-user)
    identity: RwLock<Option<UserId>>,

    /// Current lifecycle state
    state: RwLock<ConnectionState>,

    /// Channel to the connection's writer task
    sender: mpsc::Sender<ServerEvent>,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection
    pub fn new(session_id: String, sender: mpsc::Sender<ServerEvent>) -> Arc<Self> {
        Arc::new(Self {
            session_id,
            identity: RwLock::new(None),
            state: RwLock::new(ConnectionState::Connected),
            sender,
            created_at: Instant::now(),
        })
    }

    /// Get the session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get the registered identity (if any)
    pub async fn identity(&self) -> Option<UserId> {
        self.identity.read().await.clone()
    }

    /// Set or clear the registered identity
    pub async fn set_identity(&self, identity: Option<UserId>) {
        *self.identity.write().await = identity;
    }

    /// Get the current state
    pub async fn state(&self) -> ConnectionState {
        *self.state.read().await
    }

    /// Set the connection state
    pub async fn set_state(&self, state: ConnectionState) {
        *self.state.write().await = state;
    }

    /// Check if the connection has a registered identity
    pub async fn is_registered(&self) -> bool {
        self.identity.read().await.is_some()
    }

    /// Get connection age
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }

    /// Send an event to this connection
    ///
    /// A failed send means the writer task is gone; callers treat that
    /// the same as an offline target.
    pub async fn send(&self, event: ServerEvent) -> Result<(), mpsc::error::SendError<ServerEvent>> {
        self.sender.send(event).await
    }

    /// Check if the sender channel is closed
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .field("created_at", &self.created_at)
            .finish()
    }
}
