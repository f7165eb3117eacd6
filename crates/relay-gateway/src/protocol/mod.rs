//! Wire protocol
//!
//! Every frame on the socket is a JSON text message of the shape
//! `{"event": <name>, "data": <payload>}`. Inbound frames deserialize
//! into [`ClientEvent`], outbound frames serialize from [`ServerEvent`].
//!
//! Event names and payload keys match the protocol the existing clients
//! already speak, spelling quirks included (`recieverId`, `msg-recieve`).

mod client;
mod server;
mod user_id;

pub use client::{CallAccept, CallReject, ChatMessage, ClientEvent, OutgoingCall, ReadReceipt};
pub use server::{CallKind, IncomingCall, MessageReceived, OnlineUsers, ServerEvent};
pub use user_id::UserId;
