//! HTTP control API for a browser front end
//!
//! The front end runs its own speech recognizer and forwards each result:
//! - POST /conversation/capture - Run a turn from a recognition result
//! - POST /conversation/analyze - End-of-interaction analysis
//! - PUT /conversation/participant - Select the participant
//! - GET /conversation - Stats, transcript and latest analysis
//! - GET /conversation/view - Rendered view as plain text
//! - GET /conversation/export - Transcript download
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::{CaptureRequest, ConversationSnapshot, ParticipantRequest};
pub use routes::create_router;
pub use state::AppState;
