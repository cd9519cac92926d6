//! Axum Handlers for the REST API
//!
//! Signed-URL issuance (bearer-key auth + rate limiting), the read-only
//! analytics endpoints, and feedback submission. Only auth, rate-limit, and
//! not-found conditions surface as hard HTTP failures; everything else that
//! can be recovered locally is (see the relay module for the socket side).

use axum::{
    extract::{ConnectInfo, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use palaver_core::sentiment::{Mood, SentimentAnalyzer};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::{
    models::{
        ConversationDetail, ConversationFeedback, DetailMessage, ErrorResponse, FeedbackPayload,
        FeedbackSummary, MetricsSummary, RateLimitedResponse, SignedUrlResponse,
    },
    state::AppState,
};

/// How many rows the feedback summary returns in `recentFeedback`.
const RECENT_FEEDBACK_LIMIT: i64 = 10;

pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    RateLimited {
        message: String,
        reset_time: DateTime<Utc>,
    },
    NotFound(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, Json(ErrorResponse { message })).into_response()
            }
            ApiError::RateLimited {
                message,
                reset_time,
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(RateLimitedResponse {
                    message,
                    reset_time,
                }),
            )
                .into_response(),
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { message })).into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::InternalServerError(err.into())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlParams {
    pub agent_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDetailParams {
    pub conversation_id: Option<Uuid>,
}

/// Extracts the bearer token from an `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Issue a signed conversation URL for a widget client.
#[utoipa::path(
    get,
    path = "/api/signed-url",
    responses(
        (status = 200, description = "Signed URL issued", body = SignedUrlResponse),
        (status = 400, description = "Missing agentId", body = ErrorResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = RateLimitedResponse),
        (status = 500, description = "Provider failure", body = ErrorResponse)
    ),
    params(
        ("agentId" = String, Query, description = "The provider agent to start a conversation with"),
        ("Authorization" = String, Header, description = "Bearer API key")
    )
)]
pub async fn get_signed_url(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(params): Query<SignedUrlParams>,
) -> Result<Json<SignedUrlResponse>, ApiError> {
    let token = bearer_token(&headers).ok_or_else(|| {
        ApiError::Unauthorized("Authorization header with a Bearer key is required".to_string())
    })?;
    if !state.config.client_api_keys.contains(token) {
        return Err(ApiError::Unauthorized("Unrecognized API key".to_string()));
    }

    let decision = state
        .rate_limiter
        .check(&addr.ip().to_string(), Utc::now())
        .await;
    if decision.exceeded {
        return Err(ApiError::RateLimited {
            message: "Too many requests, please try again later.".to_string(),
            reset_time: decision.reset_at,
        });
    }

    let signed_url = state
        .provider
        .issue_signed_url(&params.agent_id)
        .await
        .map_err(ApiError::InternalServerError)?;
    Ok(Json(SignedUrlResponse { signed_url }))
}

/// Aggregate conversation metrics for the dashboard.
#[utoipa::path(
    get,
    path = "/api/analytics/metrics",
    responses(
        (status = 200, description = "Metrics summary", body = MetricsSummary),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    params(
        ("startDate" = Option<String>, Query, description = "ISO-8601 lower bound on conversation start"),
        ("endDate" = Option<String>, Query, description = "ISO-8601 upper bound on conversation start")
    )
)]
pub async fn metrics_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<MetricsSummary>, ApiError> {
    let summary = state
        .ledger
        .metrics_summary(params.start_date, params.end_date)
        .await?;
    Ok(Json(summary))
}

/// Feedback rollup for the dashboard.
#[utoipa::path(
    get,
    path = "/api/analytics/feedback",
    responses(
        (status = 200, description = "Feedback summary", body = FeedbackSummary),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn feedback_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FeedbackSummary>, ApiError> {
    let summary = state.ledger.feedback_summary(RECENT_FEEDBACK_LIMIT).await?;
    Ok(Json(summary))
}

/// A single conversation with its normalized message transcript.
#[utoipa::path(
    get,
    path = "/api/analytics/conversation",
    responses(
        (status = 200, description = "Conversation detail", body = ConversationDetail),
        (status = 404, description = "Conversation not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    params(
        ("conversationId" = Option<String>, Query, description = "Conversation id; defaults to the most recent")
    )
)]
pub async fn conversation_detail(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConversationDetailParams>,
) -> Result<Json<ConversationDetail>, ApiError> {
    let conversation_id = match params.conversation_id {
        Some(id) => id,
        None => state
            .ledger
            .latest_conversation_id()
            .await?
            .ok_or_else(|| ApiError::NotFound("No conversations recorded yet".to_string()))?,
    };

    let conversation = state
        .ledger
        .get_conversation(conversation_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Conversation '{conversation_id}' not found"))
        })?;
    let messages = state.ledger.get_messages(conversation_id).await?;

    let detail = ConversationDetail {
        id: conversation.id,
        agent_id: conversation.agent_id,
        started_at: conversation.started_at,
        ended_at: conversation.ended_at,
        duration_seconds: conversation.duration_seconds,
        total_turns: conversation.total_turns,
        overall_sentiment: conversation.overall_sentiment,
        messages: messages
            .into_iter()
            .enumerate()
            .map(|(index, message)| DetailMessage {
                id: index as i64 + 1,
                role: message.role,
                content: message.content,
                timestamp: message.timestamp.to_rfc3339(),
                sentiment: message.sentiment.map(|json| json.0),
            })
            .collect(),
    };
    Ok(Json(detail))
}

/// Record feedback for a conversation.
#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = FeedbackPayload,
    responses(
        (status = 201, description = "Feedback recorded", body = ConversationFeedback),
        (status = 400, description = "Rating out of range", body = ErrorResponse),
        (status = 404, description = "Conversation not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FeedbackPayload>,
) -> Result<impl IntoResponse, ApiError> {
    if !(1..=5).contains(&payload.rating) {
        return Err(ApiError::BadRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }
    state
        .ledger
        .get_conversation(payload.conversation_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "Conversation '{}' not found",
                payload.conversation_id
            ))
        })?;

    let label = feedback_label(&state.analyzer, &payload);
    let feedback = state
        .ledger
        .add_feedback(
            payload.conversation_id,
            payload.rating,
            &payload.feedback,
            &label.to_string(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// Derives the stored sentiment label: score the free text when present,
/// fall back to the star rating otherwise.
fn feedback_label(analyzer: &SentimentAnalyzer, payload: &FeedbackPayload) -> Mood {
    if payload.feedback.trim().is_empty() {
        match payload.rating {
            4..=5 => Mood::Positive,
            1..=2 => Mood::Negative,
            _ => Mood::Neutral,
        }
    } else {
        analyzer.score(&payload.feedback).mood
    }
}
