//! Chat relay handlers (send-msg, mark-read)
//!
//! Best-effort single-hop forwarding. An offline target means the event
//! is dropped; there is no queue and the sender is not told.

use crate::protocol::{ChatMessage, MessageReceived, ReadReceipt, ServerEvent};
use crate::server::GatewayState;

/// Handles chat-message and read-receipt relay events
pub struct ChatHandler;

impl ChatHandler {
    /// Forward a chat message to its target, verbatim
    pub async fn send_message(state: &GatewayState, message: ChatMessage) {
        let ChatMessage { from, to, message } = message;

        match state.registry().resolve(&to) {
            Some(target) => {
                tracing::debug!(from = %from, to = %to, "Relaying message");
                let _ = target
                    .send(ServerEvent::MsgRecieve(MessageReceived { from, message }))
                    .await;
            }
            None => {
                tracing::debug!(from = %from, to = %to, "Message dropped (target offline)");
            }
        }
    }

    /// Forward a read receipt to the original sender
    pub async fn mark_read(state: &GatewayState, receipt: ReadReceipt) {
        match state.registry().resolve(&receipt.id) {
            Some(target) => {
                tracing::debug!(
                    id = %receipt.id,
                    reciever_id = %receipt.reciever_id,
                    "Relaying read receipt"
                );
                let _ = target.send(ServerEvent::MarkReadRecieve(receipt)).await;
            }
            None => {
                tracing::debug!(id = %receipt.id, "Read receipt dropped (sender offline)");
            }
        }
    }
}
