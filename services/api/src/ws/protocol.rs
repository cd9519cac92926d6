//! Defines the WebSocket message protocol between the widget client and the
//! relay.
//!
//! Upstream frames are passed through to the client verbatim and are not
//! modeled here; this module only covers the events the relay itself parses
//! or synthesizes.

use serde::{Deserialize, Serialize};

/// Messages sent from the client (widget) to the relay.
#[derive(Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Starts the session. Must be the first message; repeats are ignored.
    #[serde(rename = "init", rename_all = "camelCase")]
    Init {
        /// The provider agent the conversation targets.
        agent_id: String,
        /// Provider-issued signed URL authorizing the upstream socket.
        signed_url: String,
    },
    /// A text turn from the user, valid only while the session is active.
    #[serde(rename = "message")]
    Message { content: String },
}

/// Messages the relay synthesizes for the client, alongside the raw
/// upstream pass-through.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Normalized provider activity so UI consumers need not understand the
    /// provider's native status spelling.
    VoiceStatus { status: VoiceStatus },
    /// Reports an upstream connect/send failure to the client.
    Error { message: String },
}

/// The normalized provider-activity vocabulary.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VoiceStatus {
    Listening,
    Speaking,
    Thinking,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_event_parses_camel_case_fields() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"init","agentId":"a1","signedUrl":"wss://provider.example/s?token=x"}"#,
        )
        .unwrap();
        match msg {
            ClientMessage::Init {
                agent_id,
                signed_url,
            } => {
                assert_eq!(agent_id, "a1");
                assert_eq!(signed_url, "wss://provider.example/s?token=x");
            }
            _ => panic!("expected init"),
        }
    }

    #[test]
    fn message_event_parses_content() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"message","content":"hello"}"#).unwrap();
        match msg {
            ClientMessage::Message { content } => assert_eq!(content, "hello"),
            _ => panic!("expected message"),
        }
    }

    #[test]
    fn unknown_event_type_is_rejected() {
        let result: Result<ClientMessage, _> =
            serde_json::from_str(r#"{"type":"disconnect"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn voice_status_serializes_to_the_documented_shape() {
        let json = serde_json::to_string(&ServerMessage::VoiceStatus {
            status: VoiceStatus::Listening,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"voice_status","status":"listening"}"#);
    }

    #[test]
    fn error_serializes_to_the_documented_shape() {
        let json = serde_json::to_string(&ServerMessage::Error {
            message: "upstream unavailable".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"error","message":"upstream unavailable"}"#);
    }
}
