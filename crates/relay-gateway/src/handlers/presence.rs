//! Presence handlers (add-user, signout)

use crate::broadcast::PresenceNotifier;
use crate::connection::{Connection, ConnectionState};
use crate::protocol::UserId;
use crate::server::GatewayState;
use std::sync::Arc;

/// Handles registration and signout events
pub struct PresenceHandler;

impl PresenceHandler {
    /// Handle add-user: bind this connection to an identity
    ///
    /// Registration is unconditional; a second registration for the same
    /// identity displaces the earlier connection's entry. A connection
    /// switching to a different identity releases the one it held, so no
    /// entry outlives the identity the connection currently answers to.
    pub async fn register(state: &GatewayState, connection: &Arc<Connection>, user_id: UserId) {
        if let Some(previous) = connection.identity().await {
            if previous != user_id
                && state
                    .registry()
                    .unregister_owned(&previous, connection.session_id())
            {
                tracing::debug!(
                    session_id = %connection.session_id(),
                    user_id = %previous,
                    "Released previous identity on re-registration"
                );
            }
        }

        state
            .registry()
            .register(user_id.clone(), Arc::clone(connection));

        connection.set_identity(Some(user_id.clone())).await;
        connection.set_state(ConnectionState::Registered).await;

        tracing::info!(
            session_id = %connection.session_id(),
            user_id = %user_id,
            "User registered"
        );

        PresenceNotifier::presence_changed(state, connection.session_id()).await;
    }

    /// Handle signout: drop the identity's presence entry
    ///
    /// The connection stays open and may register again. The broadcast
    /// fires even when the identity was not registered, mirroring the
    /// unconditional delete-then-announce of the client protocol.
    pub async fn signout(state: &GatewayState, connection: &Arc<Connection>, user_id: UserId) {
        let removed = state.registry().unregister(&user_id);

        if connection.identity().await.as_ref() == Some(&user_id) {
            connection.set_identity(None).await;
            connection.set_state(ConnectionState::Connected).await;
        }

        tracing::info!(
            session_id = %connection.session_id(),
            user_id = %user_id,
            removed = removed,
            "User signed out"
        );

        PresenceNotifier::presence_changed(state, connection.session_id()).await;
    }
}
