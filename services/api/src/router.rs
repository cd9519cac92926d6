//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API, the relay WebSocket endpoint, and OpenAPI
//! documentation.

use crate::{
    handlers,
    models::{
        ConversationDetail, ConversationFeedback, DetailMessage, EmotionalState, ErrorResponse,
        FeedbackPayload, FeedbackSummary, LabelCount, MessageRole, MetricsSummary, MoodCount,
        RateLimitedResponse, SentimentPoint, SignedUrlResponse,
    },
    state::AppState,
    ws::ws_handler,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_signed_url,
        handlers::metrics_summary,
        handlers::feedback_summary,
        handlers::conversation_detail,
        handlers::submit_feedback,
    ),
    components(
        schemas(
            SignedUrlResponse,
            MetricsSummary,
            MoodCount,
            SentimentPoint,
            EmotionalState,
            FeedbackSummary,
            LabelCount,
            ConversationDetail,
            DetailMessage,
            ConversationFeedback,
            FeedbackPayload,
            MessageRole,
            ErrorResponse,
            RateLimitedResponse,
        )
    ),
    tags(
        (name = "Palaver API", description = "Session-token issuance and conversation analytics for the Palaver relay")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/api/signed-url", get(handlers::get_signed_url))
        .route("/api/analytics/metrics", get(handlers::metrics_summary))
        .route("/api/analytics/feedback", get(handlers::feedback_summary))
        .route(
            "/api/analytics/conversation",
            get(handlers::conversation_detail),
        )
        .route("/api/feedback", post(handlers::submit_feedback))
        .route("/ws", get(ws_handler))
        // Apply the state ONLY to this group of routes.
        .with_state(app_state);

    // Merge the stateful routes with the stateless Swagger UI.
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
