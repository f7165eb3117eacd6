//! Gateway integration tests
//!
//! End-to-end flows over real WebSocket connections: presence
//! registration, call signaling, message relay, and disconnect cleanup.

use anyhow::Result;
use integration_tests::TestServer;
use relay_gateway::protocol::{
    CallAccept, CallReject, ChatMessage, ClientEvent, IncomingCall, MessageReceived, OnlineUsers,
    OutgoingCall, ReadReceipt, ServerEvent, UserId,
};

#[tokio::test]
async fn health_check_returns_ok() -> Result<()> {
    let server = TestServer::start().await?;

    let response = reqwest::get(format!("{}/health", server.base_url())).await?;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await?, "OK");

    Ok(())
}

#[tokio::test]
async fn registration_broadcasts_online_users_to_peers() -> Result<()> {
    let server = TestServer::start().await?;

    let mut alice = server.connect_as("alice").await?;
    let _bob = server.connect_as("bob").await?;

    // Alice hears about Bob's registration; the snapshot contains both
    let event = alice.recv().await?;
    assert_eq!(
        event,
        ServerEvent::OnlineUsers(OnlineUsers {
            online_users: vec![UserId::new("alice"), UserId::new("bob")],
        })
    );

    Ok(())
}

#[tokio::test]
async fn registering_connection_does_not_hear_its_own_broadcast() -> Result<()> {
    let server = TestServer::start().await?;

    let mut alice = server.connect_as("alice").await?;
    alice.expect_silence().await?;

    Ok(())
}

#[tokio::test]
async fn send_msg_reaches_registered_target_verbatim() -> Result<()> {
    let server = TestServer::start().await?;

    let mut alice = server.connect_as("alice").await?;
    let mut bob = server.connect_as("bob").await?;
    let _ = alice.recv().await?; // bob's presence broadcast

    alice
        .send(&ClientEvent::SendMsg(ChatMessage {
            from: UserId::new("alice"),
            to: UserId::new("bob"),
            message: "hey bob".to_string(),
        }))
        .await?;

    let event = bob.recv().await?;
    assert_eq!(
        event,
        ServerEvent::MsgRecieve(MessageReceived {
            from: UserId::new("alice"),
            message: "hey bob".to_string(),
        })
    );

    Ok(())
}

#[tokio::test]
async fn send_msg_to_offline_target_is_dropped_silently() -> Result<()> {
    let server = TestServer::start().await?;

    let mut alice = server.connect_as("alice").await?;

    alice
        .send(&ClientEvent::SendMsg(ChatMessage {
            from: UserId::new("alice"),
            to: UserId::new("nobody"),
            message: "hello?".to_string(),
        }))
        .await?;

    // No delivery confirmation, no error
    alice.expect_silence().await?;

    Ok(())
}

#[tokio::test]
async fn voice_call_rings_registered_target() -> Result<()> {
    let server = TestServer::start().await?;

    let mut alice = server.connect_as("alice").await?;
    let mut bob = server.connect_as("bob").await?;
    let _ = alice.recv().await?;

    alice
        .send(&ClientEvent::OutgoingVoiceCall(OutgoingCall {
            from: UserId::new("alice"),
            to: UserId::new("bob"),
            room_id: "room-7".to_string(),
            call_type: "voice".to_string(),
        }))
        .await?;

    let event = bob.recv().await?;
    assert_eq!(
        event,
        ServerEvent::IncomingVoiceCall(IncomingCall {
            from: UserId::new("alice"),
            room_id: "room-7".to_string(),
            call_type: "voice".to_string(),
        })
    );

    // And nothing bounces back to the caller
    alice.expect_silence().await?;

    Ok(())
}

#[tokio::test]
async fn video_call_to_offline_target_notifies_caller() -> Result<()> {
    let server = TestServer::start().await?;

    let mut alice = server.connect_as("alice").await?;

    alice
        .send(&ClientEvent::OutgoingVideoCall(OutgoingCall {
            from: UserId::new("alice"),
            to: UserId::new("nobody"),
            room_id: "room-9".to_string(),
            call_type: "video".to_string(),
        }))
        .await?;

    assert_eq!(alice.recv().await?, ServerEvent::VideoCallOffline);

    Ok(())
}

#[tokio::test]
async fn reject_and_accept_round_trip() -> Result<()> {
    let server = TestServer::start().await?;

    let mut alice = server.connect_as("alice").await?;
    let mut bob = server.connect_as("bob").await?;
    let _ = alice.recv().await?;

    // Bob declines: the caller (alice) is notified
    bob.send(&ClientEvent::RejectVoiceCall(CallReject {
        from: UserId::new("alice"),
    }))
    .await?;
    assert_eq!(alice.recv().await?, ServerEvent::VoiceCallRejected);

    // Bob answers: the counterpart (alice) is notified
    bob.send(&ClientEvent::AcceptIncomingCall(CallAccept {
        id: UserId::new("alice"),
    }))
    .await?;
    assert_eq!(alice.recv().await?, ServerEvent::AcceptCall);

    Ok(())
}

#[tokio::test]
async fn mark_read_relays_receipt_to_original_sender() -> Result<()> {
    let server = TestServer::start().await?;

    let mut alice = server.connect_as("alice").await?;
    let mut bob = server.connect_as("bob").await?;
    let _ = alice.recv().await?;

    bob.send(&ClientEvent::MarkRead(ReadReceipt {
        id: UserId::new("alice"),
        reciever_id: UserId::new("bob"),
    }))
    .await?;

    assert_eq!(
        alice.recv().await?,
        ServerEvent::MarkReadRecieve(ReadReceipt {
            id: UserId::new("alice"),
            reciever_id: UserId::new("bob"),
        })
    );

    Ok(())
}

#[tokio::test]
async fn signout_keeps_connection_usable() -> Result<()> {
    let server = TestServer::start().await?;

    let mut alice = server.connect_as("alice").await?;
    let mut bob = server.connect_as("bob").await?;
    let _ = alice.recv().await?;

    alice
        .send_json(&serde_json::json!({ "event": "signout", "data": "alice" }))
        .await?;

    // Bob sees alice leave
    assert_eq!(
        bob.recv().await?,
        ServerEvent::OnlineUsers(OnlineUsers {
            online_users: vec![UserId::new("bob")],
        })
    );

    // The connection can register again
    alice
        .send_json(&serde_json::json!({ "event": "add-user", "data": "alice" }))
        .await?;
    assert_eq!(
        bob.recv().await?,
        ServerEvent::OnlineUsers(OnlineUsers {
            online_users: vec![UserId::new("alice"), UserId::new("bob")],
        })
    );

    Ok(())
}

#[tokio::test]
async fn disconnect_without_signout_reclaims_presence() -> Result<()> {
    let server = TestServer::start().await?;

    let alice = server.connect_as("alice").await?;
    let mut bob = server.connect_as("bob").await?;

    // Close the socket abruptly; no signout event
    alice.disconnect().await?;

    assert_eq!(
        bob.recv().await?,
        ServerEvent::OnlineUsers(OnlineUsers {
            online_users: vec![UserId::new("bob")],
        })
    );

    // Alice is no longer a reachable target
    bob.send(&ClientEvent::SendMsg(ChatMessage {
        from: UserId::new("bob"),
        to: UserId::new("alice"),
        message: "still there?".to_string(),
    }))
    .await?;
    bob.expect_silence().await?;

    Ok(())
}

#[tokio::test]
async fn malformed_frames_do_not_kill_the_connection() -> Result<()> {
    let server = TestServer::start().await?;

    let mut alice = server.connect_as("alice").await?;
    let mut bob = server.connect_as("bob").await?;
    let _ = alice.recv().await?;

    alice.send_raw("not json").await?;
    alice.send_raw(r#"{"event":"no-such-event","data":{}}"#).await?;
    alice.send_raw(r#"{"event":"send-msg","data":{"from":"alice"}}"#).await?;

    // The connection still relays fine afterwards
    alice
        .send(&ClientEvent::SendMsg(ChatMessage {
            from: UserId::new("alice"),
            to: UserId::new("bob"),
            message: "survived".to_string(),
        }))
        .await?;

    assert_eq!(
        bob.recv().await?,
        ServerEvent::MsgRecieve(MessageReceived {
            from: UserId::new("alice"),
            message: "survived".to_string(),
        })
    );

    Ok(())
}

#[tokio::test]
async fn last_registration_wins_across_connections() -> Result<()> {
    let server = TestServer::start().await?;

    let mut old_device = server.connect_as("alice").await?;
    let mut new_device = server.connect_as("alice").await?;
    let mut bob = server.connect_as("bob").await?;

    // Drain setup broadcasts
    let _ = old_device.recv().await?; // new_device's registration
    let _ = old_device.recv().await?; // bob's registration
    let _ = new_device.recv().await?; // bob's registration

    bob.send(&ClientEvent::SendMsg(ChatMessage {
        from: UserId::new("bob"),
        to: UserId::new("alice"),
        message: "which device?".to_string(),
    }))
    .await?;

    // Only the newest registration receives
    assert_eq!(
        new_device.recv().await?,
        ServerEvent::MsgRecieve(MessageReceived {
            from: UserId::new("bob"),
            message: "which device?".to_string(),
        })
    );
    old_device.expect_silence().await?;

    Ok(())
}
