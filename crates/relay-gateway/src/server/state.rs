//! Gateway state
//!
//! Application state for the gateway server.

use crate::connection::ConnectionManager;
use crate::registry::PresenceRegistry;
use relay_common::AppConfig;
use std::sync::Arc;

/// Gateway application state
///
/// Holds all shared dependencies for the gateway server. The registry is
/// the only shared mutable resource the relay paths touch.
#[derive(Clone)]
pub struct GatewayState {
    /// Connection manager for WebSocket connections
    connections: Arc<ConnectionManager>,
    /// Presence registry (identity → connection handle)
    registry: Arc<PresenceRegistry>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            connections: ConnectionManager::new_shared(),
            registry: PresenceRegistry::new_shared(),
            config: Arc::new(config),
        }
    }

    /// Get the connection manager
    pub fn connections(&self) -> &ConnectionManager {
        &self.connections
    }

    /// Get the presence registry
    pub fn registry(&self) -> &PresenceRegistry {
        &self.registry
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("connections", &self.connections)
            .field("registry", &self.registry)
            .finish()
    }
}
