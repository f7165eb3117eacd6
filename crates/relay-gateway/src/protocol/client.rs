//! Inbound client events
//!
//! One tagged union over everything a connected client may send, so a
//! single dispatch function per connection task covers the whole protocol.

use super::UserId;
use serde::{Deserialize, Serialize};

/// Events a connected client sends to the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Register this connection under an identity
    AddUser(UserId),
    /// Drop the identity's presence entry; the connection stays open
    Signout(UserId),
    /// Offer a voice call to another user
    OutgoingVoiceCall(OutgoingCall),
    /// Offer a video call to another user
    OutgoingVideoCall(OutgoingCall),
    /// Decline a ringing voice call
    RejectVoiceCall(CallReject),
    /// Decline a ringing video call
    RejectVideoCall(CallReject),
    /// Answer a ringing call
    AcceptIncomingCall(CallAccept),
    /// Relay a chat message to another user
    SendMsg(ChatMessage),
    /// Relay a read receipt to the original sender
    MarkRead(ReadReceipt),
}

impl ClientEvent {
    /// Deserialize from a JSON text frame
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Wire name of this event
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddUser(_) => "add-user",
            Self::Signout(_) => "signout",
            Self::OutgoingVoiceCall(_) => "outgoing-voice-call",
            Self::OutgoingVideoCall(_) => "outgoing-video-call",
            Self::RejectVoiceCall(_) => "reject-voice-call",
            Self::RejectVideoCall(_) => "reject-video-call",
            Self::AcceptIncomingCall(_) => "accept-incoming-call",
            Self::SendMsg(_) => "send-msg",
            Self::MarkRead(_) => "mark-read",
        }
    }
}

/// Call offer payload
///
/// `call_type` is carried verbatim; the gateway never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingCall {
    pub from: UserId,
    pub to: UserId,
    pub room_id: String,
    pub call_type: String,
}

/// Call rejection payload; `from` is the party to notify
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallReject {
    pub from: UserId,
}

/// Call acceptance payload; `id` is the party to notify
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallAccept {
    pub id: UserId,
}

/// Chat message relay payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub from: UserId,
    pub to: UserId,
    pub message: String,
}

/// Read receipt payload
///
/// `id` is the original sender being notified, `recieverId` the reader
/// acknowledging. The key spelling is fixed by the client protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadReceipt {
    pub id: UserId,
    #[serde(rename = "recieverId")]
    pub reciever_id: UserId,
}
