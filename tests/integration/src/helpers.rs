//! Test helpers for integration tests
//!
//! Provides utilities for spawning a gateway server and driving it with
//! real WebSocket clients.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use futures_util::{SinkExt, StreamExt};
use relay_common::AppConfig;
use relay_gateway::protocol::{ClientEvent, ServerEvent};
use relay_gateway::{create_app, GatewayState};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

/// How long to wait for an expected event before failing the test
const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to listen before concluding no event is coming
const SILENCE_WINDOW: Duration = Duration::from_millis(200);

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new gateway on an ephemeral port
    pub async fn start() -> Result<Self> {
        let state = GatewayState::new(AppConfig::default());
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(50)).await;

        Ok(Self {
            addr,
            _handle: handle,
        })
    }

    /// Get base URL for HTTP requests
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the WebSocket URL for the gateway route
    pub fn gateway_url(&self) -> String {
        format!("ws://{}/gateway", self.addr)
    }

    /// Open a new WebSocket client against this server
    pub async fn connect(&self) -> Result<TestClient> {
        let (socket, _response) = connect_async(self.gateway_url())
            .await
            .context("WebSocket connect failed")?;

        Ok(TestClient { socket })
    }

    /// Open a client and register it under an identity
    pub async fn connect_as(&self, user_id: &str) -> Result<TestClient> {
        let mut client = self.connect().await?;
        client
            .send_json(&serde_json::json!({ "event": "add-user", "data": user_id }))
            .await?;
        // Let the server process the registration so that traffic from
        // other clients resolves this identity.
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(client)
    }
}

/// One WebSocket client talking to the gateway
pub struct TestClient {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Send a typed client event
    pub async fn send(&mut self, event: &ClientEvent) -> Result<()> {
        let json = event.to_json()?;
        self.socket.send(Message::Text(json)).await?;
        Ok(())
    }

    /// Send a raw JSON value as a text frame
    pub async fn send_json(&mut self, value: &serde_json::Value) -> Result<()> {
        self.socket
            .send(Message::Text(serde_json::to_string(value)?))
            .await?;
        Ok(())
    }

    /// Send a raw text frame (for malformed-input tests)
    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.socket.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Receive the next server event, failing after a timeout
    pub async fn recv(&mut self) -> Result<ServerEvent> {
        loop {
            let frame = timeout(RECV_TIMEOUT, self.socket.next())
                .await
                .context("timed out waiting for event")?
                .context("connection closed")??;

            match frame {
                Message::Text(text) => return Ok(ServerEvent::from_json(&text)?),
                // Transport-level frames are not protocol events
                Message::Ping(_) | Message::Pong(_) => {}
                other => bail!("unexpected frame: {other:?}"),
            }
        }
    }

    /// Assert that no server event arrives within the silence window
    pub async fn expect_silence(&mut self) -> Result<()> {
        match timeout(SILENCE_WINDOW, self.socket.next()).await {
            Err(_) => Ok(()),
            Ok(Some(Ok(Message::Text(text)))) => bail!("unexpected event: {text}"),
            Ok(Some(Ok(_))) => Ok(()),
            Ok(Some(Err(e))) => bail!("connection error: {e}"),
            Ok(None) => bail!("connection closed"),
        }
    }

    /// Close the connection without signing out
    pub async fn disconnect(mut self) -> Result<()> {
        self.socket.close(None).await?;
        Ok(())
    }
}
