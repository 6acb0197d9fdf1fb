use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Conversation queries
        .route("/conversation", get(handlers::get_conversation))
        .route("/conversation/view", get(handlers::get_view))
        .route("/conversation/export", get(handlers::export_transcript))
        // Conversation control
        .route("/conversation/capture", post(handlers::capture))
        .route("/conversation/analyze", post(handlers::analyze))
        .route("/conversation/participant", put(handlers::select_participant))
        // The front end is served from another origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
