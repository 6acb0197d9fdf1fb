pub mod backend;
pub mod chat;
pub mod config;
pub mod error;
pub mod http;
pub mod render;
pub mod session;
pub mod speech;

pub use backend::{
    format_response_text, AnalysisRequest, AnalysisResult, BackendClient, BackendEndpoints,
    ConversationBackend, TurnReply, TurnRequest,
};
pub use config::Config;
pub use error::{Capability, Error, Result};
pub use http::{create_router, AppState};
pub use render::{DisplaySurface, Notifier, SnapshotSurface, View};
pub use session::{
    ConversationSession, ParticipantSelection, Role, SessionCollaborators, SessionConfig,
    SessionStats, Transcript, TurnOutcome, TurnState, Utterance,
};
pub use speech::{
    RecognizerConfig, SpeechInput, SpeechOutput, SpeechRecognizer, SpeechSynthesizer,
    VoiceSettings,
};
