//! Inbound event handlers
//!
//! Routes each decoded client event to the component that owns it.

mod chat;
mod presence;
mod signaling;

pub use chat::ChatHandler;
pub use presence::PresenceHandler;
pub use signaling::SignalingHandler;

use crate::connection::Connection;
use crate::protocol::{CallKind, ClientEvent};
use crate::server::GatewayState;
use std::sync::Arc;

/// Dispatch incoming client events to appropriate handlers
///
/// Dispatch is infallible: an unreachable target is a normal branch and
/// every failure mode ends in a logged drop, never an error surfaced to
/// the peer.
pub struct EventDispatcher;

impl EventDispatcher {
    /// Handle one incoming client event
    pub async fn dispatch(state: &GatewayState, connection: &Arc<Connection>, event: ClientEvent) {
        tracing::trace!(
            session_id = %connection.session_id(),
            event = event.name(),
            "Dispatching event"
        );

        match event {
            ClientEvent::AddUser(user_id) => {
                PresenceHandler::register(state, connection, user_id).await;
            }
            ClientEvent::Signout(user_id) => {
                PresenceHandler::signout(state, connection, user_id).await;
            }
            ClientEvent::OutgoingVoiceCall(call) => {
                SignalingHandler::outgoing_call(state, CallKind::Voice, call).await;
            }
            ClientEvent::OutgoingVideoCall(call) => {
                SignalingHandler::outgoing_call(state, CallKind::Video, call).await;
            }
            ClientEvent::RejectVoiceCall(reject) => {
                SignalingHandler::reject_call(state, CallKind::Voice, reject).await;
            }
            ClientEvent::RejectVideoCall(reject) => {
                SignalingHandler::reject_call(state, CallKind::Video, reject).await;
            }
            ClientEvent::AcceptIncomingCall(accept) => {
                SignalingHandler::accept_call(state, accept).await;
            }
            ClientEvent::SendMsg(message) => {
                ChatHandler::send_message(state, message).await;
            }
            ClientEvent::MarkRead(receipt) => {
                ChatHandler::mark_read(state, receipt).await;
            }
        }
    }
}
