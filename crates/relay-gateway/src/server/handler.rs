//! WebSocket handler
//!
//! Accepts connections, pumps frames in both directions, and guarantees
//! presence cleanup on every teardown path.

use crate::broadcast::PresenceNotifier;
use crate::connection::{Connection, ConnectionState};
use crate::handlers::EventDispatcher;
use crate::protocol::ClientEvent;
use crate::server::GatewayState;
use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Channel buffer size for outgoing events
const EVENT_BUFFER_SIZE: usize = 100;

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: axum::extract::ws::WebSocket) {
    let session_id = uuid::Uuid::new_v4().to_string();

    // Create event channel for outgoing events
    let (tx, mut rx) = mpsc::channel(EVENT_BUFFER_SIZE);

    // Register connection
    let connection = state.connections().add_connection(session_id.clone(), tx);

    tracing::info!(session_id = %session_id, "WebSocket connection established");

    // Split the WebSocket
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Clone state for the reader task
    let state_recv = state.clone();
    let connection_recv = connection.clone();

    // Reader task: one event at a time, in arrival order
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    handle_text_frame(&state_recv, &connection_recv, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    // The protocol is text-only; ignore rather than kill the task
                    tracing::debug!(
                        session_id = %connection_recv.session_id(),
                        "Ignoring binary frame"
                    );
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Handled by axum
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(
                        session_id = %connection_recv.session_id(),
                        "Client closed connection"
                    );
                    return;
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %connection_recv.session_id(),
                        error = %e,
                        "WebSocket error"
                    );
                    return;
                }
            }
        }
    });

    // Clone for writer task
    let session_id_send = session_id.clone();

    // Writer task: drains the connection's outbound channel
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event.to_json() {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json.into())).await.is_err() {
                        tracing::warn!(
                            session_id = %session_id_send,
                            "Failed to send event to WebSocket"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(
                        session_id = %session_id_send,
                        error = %e,
                        "Failed to serialize outbound event"
                    );
                }
            }
        }

        // Close the WebSocket when channel is closed
        let _ = ws_sink.close().await;
    });

    // Whichever task exits first, the connection is done
    tokio::select! {
        _ = recv_task => {
            tracing::debug!(session_id = %session_id, "Receive task ended");
        }
        _ = send_task => {
            tracing::debug!(session_id = %session_id, "Send task ended");
        }
    }

    // Runs on every teardown path: explicit close, timeout, protocol error
    cleanup_connection(&state, &session_id, &connection).await;
}

/// Handle a text frame from the client
///
/// Malformed payloads are ignored; a bad frame must not take down the
/// connection's task or the connection itself.
async fn handle_text_frame(state: &GatewayState, connection: &Arc<Connection>, text: &str) {
    match ClientEvent::from_json(text) {
        Ok(event) => {
            EventDispatcher::dispatch(state, connection, event).await;
        }
        Err(e) => {
            tracing::debug!(
                session_id = %connection.session_id(),
                error = %e,
                "Ignoring malformed event"
            );
        }
    }
}

/// Clean up a connection on disconnect
///
/// Reclaims the presence entry for whichever identity this handle still
/// owns and announces the change. A client that vanished without signing
/// out must not leave a stale entry pointing at a dead handle.
async fn cleanup_connection(state: &GatewayState, session_id: &str, connection: &Arc<Connection>) {
    tracing::info!(session_id = %session_id, "Cleaning up connection");

    connection.set_state(ConnectionState::Closed).await;
    state.connections().remove_connection(session_id);

    if let Some(identity) = connection.identity().await {
        // Only evict the entry if this session still owns it; a newer
        // registration for the same identity belongs to someone else.
        if state.registry().unregister_owned(&identity, session_id) {
            tracing::info!(
                session_id = %session_id,
                user_id = %identity,
                "Presence entry reclaimed on disconnect"
            );
            PresenceNotifier::presence_changed(state, session_id).await;
        }
    }
}
