//! Outbound server events
//!
//! Everything the gateway emits to a connected client.

use super::client::ReadReceipt;
use super::UserId;
use serde::{Deserialize, Serialize};

/// Events the gateway sends to connected clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Current set of online identities, sent after every presence change
    OnlineUsers(OnlineUsers),
    /// A voice call is ringing for this client
    IncomingVoiceCall(IncomingCall),
    /// A video call is ringing for this client
    IncomingVideoCall(IncomingCall),
    /// The voice-call target is not reachable
    VoiceCallOffline,
    /// The video-call target is not reachable
    VideoCallOffline,
    /// The callee declined the voice call
    VoiceCallRejected,
    /// The callee declined the video call
    VideoCallRejected,
    /// The callee answered the call
    AcceptCall,
    /// A chat message relayed from another user
    MsgRecieve(MessageReceived),
    /// A read receipt relayed from the reader
    MarkReadRecieve(ReadReceipt),
}

impl ServerEvent {
    /// Serialize to a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON text frame
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Wire name of this event
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OnlineUsers(_) => "online-users",
            Self::IncomingVoiceCall(_) => "incoming-voice-call",
            Self::IncomingVideoCall(_) => "incoming-video-call",
            Self::VoiceCallOffline => "voice-call-offline",
            Self::VideoCallOffline => "video-call-offline",
            Self::VoiceCallRejected => "voice-call-rejected",
            Self::VideoCallRejected => "video-call-rejected",
            Self::AcceptCall => "accept-call",
            Self::MsgRecieve(_) => "msg-recieve",
            Self::MarkReadRecieve(_) => "mark-read-recieve",
        }
    }
}

/// Kind of call being signaled
///
/// Voice and video flows are symmetric; only the emitted event names differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Voice,
    Video,
}

impl CallKind {
    /// Build the ringing event for the callee
    #[must_use]
    pub fn incoming(self, call: IncomingCall) -> ServerEvent {
        match self {
            Self::Voice => ServerEvent::IncomingVoiceCall(call),
            Self::Video => ServerEvent::IncomingVideoCall(call),
        }
    }

    /// Build the target-unreachable event for the caller
    #[must_use]
    pub const fn offline(self) -> ServerEvent {
        match self {
            Self::Voice => ServerEvent::VoiceCallOffline,
            Self::Video => ServerEvent::VideoCallOffline,
        }
    }

    /// Build the call-declined event for the caller
    #[must_use]
    pub const fn rejected(self) -> ServerEvent {
        match self {
            Self::Voice => ServerEvent::VoiceCallRejected,
            Self::Video => ServerEvent::VideoCallRejected,
        }
    }
}

impl std::fmt::Display for CallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Voice => write!(f, "voice"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// Presence broadcast payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineUsers {
    #[serde(rename = "onlineUsers")]
    pub online_users: Vec<UserId>,
}

/// Ringing-call payload delivered to the callee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingCall {
    pub from: UserId,
    pub room_id: String,
    pub call_type: String,
}

/// Relayed chat message payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReceived {
    pub from: UserId,
    pub message: String,
}
