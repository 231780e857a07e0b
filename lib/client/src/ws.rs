//! Live-event channel over `/v1/ws`.
//!
//! The server pushes JSON envelopes `{"type": ..., "data": ...}`;
//! `event` and `dahua-event` envelopes are forwarded to the event bus,
//! anything else is ignored. The reader reconnects with a fixed delay
//! until its task is aborted, publishing its connection state at
//! [`WS_STATE_PATH`].

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use ipcman_state::{EventBus, StateStore};
use serde::Deserialize;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, warn};

/// Store path of the connection state.
pub const WS_STATE_PATH: &str = "ws/state";

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WsState {
    Connecting,
    Connected,
    Disconnected,
}

/// One decoded envelope off the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveEvent {
    /// `event` or `dahua-event`.
    pub kind: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Derive the WebSocket endpoint from the HTTP base URL.
pub fn ws_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_string()
    };
    format!("{base}/v1/ws")
}

pub struct WsChannel {
    url: String,
    store: Arc<StateStore>,
    bus: Arc<EventBus<LiveEvent>>,
}

impl WsChannel {
    pub fn new(url: String, store: Arc<StateStore>, bus: Arc<EventBus<LiveEvent>>) -> Self {
        Self { url, store, bus }
    }

    /// Read until the surrounding task is aborted, reconnecting on any
    /// error or server close.
    pub async fn run(&self) {
        loop {
            self.set_state(WsState::Connecting);
            match connect_async(self.url.as_str()).await {
                Ok((mut stream, _)) => {
                    self.set_state(WsState::Connected);
                    debug!(url = %self.url, "websocket connected");
                    while let Some(message) = stream.next().await {
                        match message {
                            Ok(Message::Text(text)) => self.handle(&text),
                            Ok(Message::Close(_)) => break,
                            Ok(_) => {}
                            Err(e) => {
                                warn!(error = %e, "websocket read failed");
                                break;
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!(url = %self.url, error = %e, "websocket connect failed");
                }
            }
            self.set_state(WsState::Disconnected);
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
    }

    fn handle(&self, text: &str) {
        let envelope: Envelope = match serde_json::from_str(text) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "dropping malformed websocket message");
                return;
            }
        };
        match envelope.kind.as_str() {
            "event" | "dahua-event" => self.bus.emit(&LiveEvent {
                kind: envelope.kind,
                data: envelope.data,
            }),
            other => debug!(kind = other, "ignoring unknown websocket envelope"),
        }
    }

    fn set_state(&self, state: WsState) {
        self.store.set(WS_STATE_PATH, state);
    }
}
