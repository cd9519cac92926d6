//! Upstream provider socket plumbing.
//!
//! The provider is a black-box WebSocket peer reachable through a signed
//! URL. This module owns connecting to it, pumping its frames into the
//! session's event channel, and classifying its native JSON envelope into
//! the relay's content/status vocabulary.

use super::session::RelayEvent;
use crate::ws::protocol::VoiceStatus;
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message as WsMessage};
use tracing::warn;

/// What the relay does with one upstream text frame, beyond the verbatim
/// pass-through every frame gets.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamEvent {
    /// The agent produced a text turn: score it and ledger it.
    Content { text: String },
    /// Provider-side activity: re-emit under the normalized vocabulary.
    Status { status: VoiceStatus },
    /// Pings, metadata, audio payloads the relay does not interpret.
    Passthrough,
}

/// Classifies one native provider frame.
///
/// The envelope is a `type`-discriminated JSON object. Frames that fail to
/// parse, or whose type the relay does not interpret, are passthrough.
pub fn classify(frame: &str) -> UpstreamEvent {
    let Ok(value) = serde_json::from_str::<Value>(frame) else {
        return UpstreamEvent::Passthrough;
    };
    match value.get("type").and_then(Value::as_str) {
        Some("agent_response") => value
            .pointer("/agent_response_event/agent_response")
            .and_then(Value::as_str)
            .map(|text| UpstreamEvent::Content {
                text: text.to_string(),
            })
            .unwrap_or(UpstreamEvent::Passthrough),
        Some("user_transcript") => UpstreamEvent::Status {
            status: VoiceStatus::Listening,
        },
        Some("internal_tentative_agent_response") => UpstreamEvent::Status {
            status: VoiceStatus::Thinking,
        },
        Some("audio") => UpstreamEvent::Status {
            status: VoiceStatus::Speaking,
        },
        _ => UpstreamEvent::Passthrough,
    }
}

/// Handle to an established upstream connection.
pub struct UpstreamHandle {
    /// Relay-to-provider frames. Dropping this closes the upstream leg.
    pub outbound: mpsc::Sender<String>,
    /// The socket pump; aborted on session close.
    pub task: JoinHandle<()>,
}

/// Seam for opening the provider socket, so the session loop can be tested
/// against a fake provider.
#[async_trait]
pub trait UpstreamConnector: Send + Sync {
    /// Opens the provider socket at `signed_url` and wires its frames into
    /// `events`. Returns the handle for the relay-to-provider direction.
    async fn connect(
        &self,
        signed_url: &str,
        events: mpsc::Sender<RelayEvent>,
    ) -> Result<UpstreamHandle>;
}

/// The production connector, backed by `tokio-tungstenite`.
pub struct TungsteniteConnector;

#[async_trait]
impl UpstreamConnector for TungsteniteConnector {
    async fn connect(
        &self,
        signed_url: &str,
        events: mpsc::Sender<RelayEvent>,
    ) -> Result<UpstreamHandle> {
        let (stream, _) = connect_async(signed_url)
            .await
            .context("failed to open the upstream conversation socket")?;
        let (mut upstream_tx, mut upstream_rx) = stream.split();
        let (outbound, mut outbound_rx) = mpsc::channel::<String>(64);

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    frame = outbound_rx.recv() => match frame {
                        Some(text) => {
                            if let Err(e) = upstream_tx.send(WsMessage::Text(text.into())).await {
                                warn!(error = %e, "upstream send failed");
                                let _ = events
                                    .send(RelayEvent::UpstreamError(e.to_string()))
                                    .await;
                                break;
                            }
                        }
                        // The session dropped its sender: close our leg.
                        None => {
                            let _ = upstream_tx.send(WsMessage::Close(None)).await;
                            break;
                        }
                    },
                    incoming = upstream_rx.next() => match incoming {
                        Some(Ok(WsMessage::Text(text))) => {
                            if events
                                .send(RelayEvent::UpstreamFrame(text.to_string()))
                                .await
                                .is_err()
                            {
                                break;
                            }
                        }
                        Some(Ok(WsMessage::Close(_))) | None => {
                            let _ = events.send(RelayEvent::UpstreamClosed).await;
                            break;
                        }
                        Some(Ok(_)) => {} // binary/ping/pong frames
                        Some(Err(e)) => {
                            warn!(error = %e, "upstream socket error");
                            let _ = events
                                .send(RelayEvent::UpstreamError(e.to_string()))
                                .await;
                            break;
                        }
                    },
                }
            }
        });

        Ok(UpstreamHandle { outbound, task })
    }
}
