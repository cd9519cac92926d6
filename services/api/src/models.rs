//! API and Database Models
//!
//! This module defines the core data structures used for database mapping
//! with `sqlx` and for generating OpenAPI documentation with `utoipa`.
//! Wire-facing shapes use camelCase field names; internal columns stay
//! snake_case.

use chrono::{DateTime, Utc};
use palaver_core::sentiment::{Mood, Sentiment};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Which side of the conversation produced a message.
#[derive(sqlx::Type, Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One `{timestamp, score}` snapshot in a conversation's sentiment trend.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SentimentPoint {
    pub timestamp: DateTime<Utc>,
    pub score: f64,
}

/// One `{timestamp, score, mood}` snapshot in a conversation's emotional
/// state history.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalState {
    pub timestamp: DateTime<Utc>,
    pub score: f64,
    #[schema(value_type = String, example = "positive")]
    pub mood: Mood,
}

/// One relay session's durable record. Owned exclusively by the relay
/// instance that created it while active; immutable once finalized.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: Uuid,
    pub config_id: Option<String>,
    pub agent_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Whole seconds between `started_at` and `ended_at`, set once at close.
    pub duration_seconds: Option<i64>,
    pub total_turns: i64,
    pub interruptions: i64,
    pub overall_sentiment: f64,
    pub sentiment_trend: Json<Vec<SentimentPoint>>,
    pub emotional_states: Json<Vec<EmotionalState>>,
}

/// One stored message turn.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub id: i64,
    pub conversation_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub sentiment: Option<Json<Sentiment>>,
}

/// Per-conversation metrics, written exactly once at finalization.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMetrics {
    pub conversation_id: Uuid,
    pub avg_response_time: f64,
    pub user_engagement_score: f64,
    pub completion_rate: f64,
    pub successful_interruptions: i64,
    pub failed_interruptions: i64,
}

/// Out-of-band feedback left for a finished conversation.
#[derive(Serialize, Deserialize, FromRow, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConversationFeedback {
    pub id: i64,
    pub conversation_id: Uuid,
    pub rating: i64,
    pub feedback: String,
    #[schema(example = "positive")]
    pub sentiment: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/feedback`.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPayload {
    pub conversation_id: Uuid,
    /// Star rating, 1 through 5.
    #[schema(example = 5)]
    pub rating: i64,
    #[serde(default)]
    pub feedback: String,
}

/// Response body for `GET /api/signed-url`.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlResponse {
    pub signed_url: String,
}

/// Aggregate dashboard metrics over a (possibly filtered) set of
/// conversations.
#[derive(Serialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub total_conversations: i64,
    /// Mean `duration_seconds` over finalized conversations; 0 when none.
    pub avg_duration: f64,
    pub avg_engagement_score: f64,
    pub avg_sentiment: f64,
    pub sentiment_trend: Vec<SentimentPoint>,
    pub emotional_state_distribution: Vec<MoodCount>,
}

/// One bucket of the mood histogram.
#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct MoodCount {
    #[schema(example = "positive")]
    pub mood: String,
    pub count: i64,
}

/// Feedback rollup: label distribution plus the most recent rows.
#[derive(Serialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSummary {
    pub sentiment_distribution: Vec<LabelCount>,
    pub recent_feedback: Vec<ConversationFeedback>,
}

/// One bucket of the feedback sentiment-label distribution.
#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct LabelCount {
    #[schema(example = "positive")]
    pub sentiment: String,
    pub count: i64,
}

/// A single conversation normalized for dashboard consumption.
#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDetail {
    pub id: Uuid,
    pub agent_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_seconds: Option<i64>,
    pub total_turns: i64,
    pub overall_sentiment: f64,
    pub messages: Vec<DetailMessage>,
}

/// A message as presented in [`ConversationDetail`]: synthetic sequential
/// id and an ISO-8601 timestamp string.
#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DetailMessage {
    pub id: i64,
    pub role: MessageRole,
    pub content: String,
    #[schema(example = "2024-06-01T12:00:00+00:00")]
    pub timestamp: String,
    #[schema(value_type = Option<Object>)]
    pub sentiment: Option<Sentiment>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// Body of a 429 response; `resetTime` tells the caller when to retry.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitedResponse {
    pub message: String,
    pub reset_time: DateTime<Utc>,
}
