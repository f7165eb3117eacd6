//! Presence broadcast
//!
//! Announces the online-identity set after every registry mutation.

use crate::protocol::{OnlineUsers, ServerEvent};
use crate::server::GatewayState;

/// Broadcasts presence changes to all connections except the mutator
pub struct PresenceNotifier;

impl PresenceNotifier {
    /// Emit the current online set to every other connection
    ///
    /// Called only after the mutating registry call has returned, so the
    /// snapshot always reflects the mutation that triggered it.
    pub async fn presence_changed(state: &GatewayState, origin_session: &str) {
        let online_users = state.registry().snapshot();

        tracing::debug!(
            origin = %origin_session,
            online = online_users.len(),
            "Broadcasting presence change"
        );

        let event = ServerEvent::OnlineUsers(OnlineUsers { online_users });
        state
            .connections()
            .broadcast_except(origin_session, event)
            .await;
    }
}
