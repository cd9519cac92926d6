//! The per-connection relay session.
//!
//! Each client connection drives exactly one `RelaySession` and at most one
//! upstream provider connection. Socket I/O lives in pump tasks at the
//! edges; the session itself is a sequential loop over a single merged
//! event channel, which keeps the state machine explicit and testable
//! without a live socket.
//!
//! Lifecycle: `AwaitingInit → ConnectingUpstream → Active → Closing →
//! Closed`, with `Degraded` as the error-visible resting state after an
//! upstream failure. Closing either leg closes the other promptly; the
//! conversation is finalized exactly once on the way out.

use super::{
    protocol::{ClientMessage, ServerMessage},
    upstream::{self, TungsteniteConnector, UpstreamConnector, UpstreamEvent, UpstreamHandle},
};
use crate::{db::Ledger, models::MessageRole, state::AppState};
use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use palaver_core::sentiment::{Sentiment, SentimentAnalyzer};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Everything that can wake the session loop, from either leg.
#[derive(Debug)]
pub enum RelayEvent {
    /// A text frame from the client socket.
    ClientFrame(String),
    /// The client socket closed or errored.
    ClientClosed,
    /// A text frame from the provider socket.
    UpstreamFrame(String),
    /// The provider socket closed cleanly.
    UpstreamClosed,
    /// The provider socket failed mid-session.
    UpstreamError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    AwaitingInit,
    ConnectingUpstream,
    Active,
    /// Upstream is gone but the client leg stays open; the client decides
    /// whether to retry at the transport level.
    Degraded,
    Closing,
    Closed,
}

pub struct RelaySession {
    ledger: Arc<Ledger>,
    analyzer: SentimentAnalyzer,
    connector: Arc<dyn UpstreamConnector>,
    /// Cloned into upstream pump tasks so their frames land in our loop.
    events_tx: mpsc::Sender<RelayEvent>,
    /// Frames bound for the client socket, raw pass-through included.
    client_tx: mpsc::Sender<String>,
    state: SessionState,
    conversation_id: Option<Uuid>,
    upstream: Option<UpstreamHandle>,
}

impl RelaySession {
    pub fn new(
        ledger: Arc<Ledger>,
        analyzer: SentimentAnalyzer,
        connector: Arc<dyn UpstreamConnector>,
        events_tx: mpsc::Sender<RelayEvent>,
        client_tx: mpsc::Sender<String>,
    ) -> Self {
        Self {
            ledger,
            analyzer,
            connector,
            events_tx,
            client_tx,
            state: SessionState::AwaitingInit,
            conversation_id: None,
            upstream: None,
        }
    }

    /// Drives the session until either leg closes, then finalizes.
    pub async fn run(mut self, mut events: mpsc::Receiver<RelayEvent>) {
        while let Some(event) = events.recv().await {
            if self.handle_event(event).await {
                break;
            }
        }
        self.shutdown().await;
    }

    /// Processes one event; returns true once the session should close.
    async fn handle_event(&mut self, event: RelayEvent) -> bool {
        match event {
            RelayEvent::ClientFrame(text) => {
                self.on_client_frame(&text).await;
                false
            }
            RelayEvent::UpstreamFrame(text) => {
                self.on_upstream_frame(text).await;
                false
            }
            RelayEvent::UpstreamError(message) => {
                warn!(error = %message, "upstream leg failed; session degraded");
                self.upstream = None;
                self.state = SessionState::Degraded;
                self.send_to_client(&ServerMessage::Error {
                    message: format!("Upstream connection failed: {message}"),
                })
                .await;
                false
            }
            RelayEvent::ClientClosed | RelayEvent::UpstreamClosed => true,
        }
    }

    async fn on_client_frame(&mut self, text: &str) {
        let parsed = match serde_json::from_str::<ClientMessage>(text) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Protocol error: drop the single event, keep the session.
                warn!(error = %e, "dropping malformed client frame");
                return;
            }
        };
        match parsed {
            ClientMessage::Init {
                agent_id,
                signed_url,
            } => self.on_init(&agent_id, &signed_url).await,
            ClientMessage::Message { content } => self.on_client_message(&content).await,
        }
    }

    async fn on_init(&mut self, agent_id: &str, signed_url: &str) {
        if self.state != SessionState::AwaitingInit {
            warn!(state = ?self.state, "ignoring repeated init event");
            return;
        }

        // The conversation record exists from the moment the client asked
        // to start, whether or not the provider is reachable.
        match self.ledger.create_conversation(agent_id, None).await {
            Ok(conversation) => {
                info!(conversation_id = %conversation.id, agent_id, "conversation started");
                self.conversation_id = Some(conversation.id);
            }
            Err(e) => error!(error = ?e, "failed to create conversation record"),
        }

        self.state = SessionState::ConnectingUpstream;
        match self
            .connector
            .connect(signed_url, self.events_tx.clone())
            .await
        {
            Ok(handle) => {
                info!("upstream connected; session active");
                self.upstream = Some(handle);
                self.state = SessionState::Active;
            }
            Err(e) => {
                warn!(error = ?e, "upstream connect failed; session degraded");
                self.state = SessionState::Degraded;
                self.send_to_client(&ServerMessage::Error {
                    message: format!("Failed to reach the conversation provider: {e}"),
                })
                .await;
            }
        }
    }

    async fn on_client_message(&mut self, content: &str) {
        if self.state != SessionState::Active {
            warn!(state = ?self.state, "dropping message event outside the active state");
            return;
        }

        let envelope = serde_json::json!({ "type": "user_message", "text": content }).to_string();
        if let Some(upstream) = &self.upstream {
            if upstream.outbound.send(envelope).await.is_err() {
                warn!("upstream leg is gone; session degraded");
                self.upstream = None;
                self.state = SessionState::Degraded;
                self.send_to_client(&ServerMessage::Error {
                    message: "Upstream connection failed".to_string(),
                })
                .await;
            }
        }

        let sentiment = self.analyzer.score(content);
        self.append(MessageRole::User, content, sentiment).await;
    }

    async fn on_upstream_frame(&mut self, text: String) {
        // Every upstream frame reaches the client verbatim.
        self.forward_raw(text.clone()).await;

        match upstream::classify(&text) {
            UpstreamEvent::Content { text } => {
                let sentiment = self.analyzer.score(&text);
                self.append(MessageRole::Assistant, &text, sentiment).await;
            }
            UpstreamEvent::Status { status } => {
                self.send_to_client(&ServerMessage::VoiceStatus { status })
                    .await;
            }
            UpstreamEvent::Passthrough => {}
        }
    }

    /// Best-effort ledger write: a persistence failure is logged and the
    /// session keeps relaying.
    async fn append(&self, role: MessageRole, content: &str, sentiment: Sentiment) {
        let Some(conversation_id) = self.conversation_id else {
            return;
        };
        if let Err(e) = self
            .ledger
            .append_message(conversation_id, role, content, Some(sentiment))
            .await
        {
            error!(error = ?e, "ledger append failed; continuing to relay");
        }
    }

    async fn forward_raw(&self, frame: String) {
        // A failed send means the client leg is closing; the reader pump
        // will deliver ClientClosed.
        let _ = self.client_tx.send(frame).await;
    }

    async fn send_to_client(&self, message: &ServerMessage) {
        match serde_json::to_string(message) {
            Ok(frame) => self.forward_raw(frame).await,
            Err(e) => error!(error = %e, "failed to serialize server message"),
        }
    }

    /// Tears down the upstream leg and finalizes the conversation. Safe to
    /// reach from any state; runs once.
    async fn shutdown(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.state = SessionState::Closing;

        // No drain: in-flight frames on the other leg are not waited for.
        if let Some(handle) = self.upstream.take() {
            handle.task.abort();
        }

        if let Some(conversation_id) = self.conversation_id {
            match self.ledger.finalize_conversation(conversation_id).await {
                Ok(true) => info!(%conversation_id, "conversation finalized"),
                Ok(false) => {}
                Err(e) => error!(error = ?e, "failed to finalize conversation"),
            }
        }
        self.state = SessionState::Closed;
    }
}

/// Axum handler to upgrade an HTTP connection to the relay WebSocket.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Wires one client socket to a fresh session: a reader pump feeding the
/// event channel, a writer pump draining the client-bound channel, and the
/// session loop in between.
#[instrument(name = "relay_session", skip_all, fields(session_id))]
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id: u32 = rand::random();
    tracing::Span::current().record("session_id", session_id);
    info!("new relay connection");

    let (mut socket_tx, mut socket_rx) = socket.split();
    let (events_tx, events_rx) = mpsc::channel::<RelayEvent>(64);
    let (client_tx, mut client_rx) = mpsc::channel::<String>(64);

    let writer = tokio::spawn(async move {
        while let Some(frame) = client_rx.recv().await {
            if socket_tx.send(Message::Text(frame.into())).await.is_err() {
                return;
            }
        }
        // Channel closed: the session ended, propagate closure.
        let _ = socket_tx.send(Message::Close(None)).await;
    });

    let reader_events = events_tx.clone();
    let reader = tokio::spawn(async move {
        while let Some(incoming) = socket_rx.next().await {
            match incoming {
                Ok(Message::Text(text)) => {
                    if reader_events
                        .send(RelayEvent::ClientFrame(text.to_string()))
                        .await
                        .is_err()
                    {
                        return;
                    }
                }
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {} // binary/ping/pong frames
            }
        }
        let _ = reader_events.send(RelayEvent::ClientClosed).await;
    });

    let session = RelaySession::new(
        state.ledger.clone(),
        state.analyzer,
        Arc::new(TungsteniteConnector),
        events_tx,
        client_tx,
    );
    session.run(events_rx).await;

    reader.abort();
    let _ = writer.await;
    info!("relay session closed");
}
