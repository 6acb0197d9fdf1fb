use super::state::AppState;
use crate::backend::AnalysisResult;
use crate::session::{SessionStats, Transcript};
use crate::speech::ForwardedRecognition;
use crate::Error;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Recognition event forwarded by the front end
///
/// Exactly one of `transcript` or `error` is expected. Neither means the
/// front end has no recognizer.
#[derive(Debug, Default, Deserialize)]
pub struct CaptureRequest {
    pub transcript: Option<String>,
    /// Recognizer error code (e.g. "no-speech", "not-allowed")
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ParticipantRequest {
    pub participant_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ParticipantResponse {
    pub participant_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ConversationSnapshot {
    pub stats: SessionStats,
    pub participant_id: i64,
    pub transcript: Transcript,
    pub emotion: Option<String>,
    pub analysis: Option<AnalysisResult>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Notice to show the user
    pub error: String,
    pub detail: String,
}

fn error_response(e: &Error) -> Response {
    let status = match e {
        Error::Busy(_) | Error::AnalysisInProgress => StatusCode::CONFLICT,
        Error::Recognition(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::CapabilityUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        Error::Network(_) | Error::Server { .. } => StatusCode::BAD_GATEWAY,
        Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: e.user_message(),
            detail: e.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /conversation/capture
/// Run one turn from a forwarded recognition result
pub async fn capture(State(state): State<AppState>, Json(req): Json<CaptureRequest>) -> Response {
    let recognition = match (req.transcript, req.error) {
        (Some(text), _) => ForwardedRecognition::transcript(text),
        (None, Some(code)) => ForwardedRecognition::error(code),
        (None, None) => ForwardedRecognition::unsupported(),
    };

    match state.session.capture_with(Box::new(recognition)).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST /conversation/analyze
/// End the interaction and analyze the transcript
pub async fn analyze(State(state): State<AppState>) -> Response {
    info!("Analysis requested for {}", state.session.session_id());

    match state.session.analyze().await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// PUT /conversation/participant
/// Select the participant used for the next turns
pub async fn select_participant(
    State(state): State<AppState>,
    Json(req): Json<ParticipantRequest>,
) -> impl IntoResponse {
    state.session.participant().select(req.participant_id);
    info!("Participant selected: {}", req.participant_id);

    Json(ParticipantResponse {
        participant_id: req.participant_id,
    })
}

/// GET /conversation
/// Stats, transcript and latest analysis
pub async fn get_conversation(State(state): State<AppState>) -> impl IntoResponse {
    let session = &state.session;

    Json(ConversationSnapshot {
        stats: session.get_stats().await,
        participant_id: session.participant().current(),
        transcript: session.get_transcript().await,
        emotion: session.last_emotion().await,
        analysis: session.analysis().await,
    })
}

/// GET /conversation/view
/// Latest rendered view
pub async fn get_view(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.view.frame(),
    )
}

/// GET /conversation/export
/// Transcript as a downloadable text file
pub async fn export_transcript(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.session.export().await;

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", state.export_file),
            ),
        ],
        body,
    )
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
