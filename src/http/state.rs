use crate::render::SnapshotSurface;
use crate::session::ConversationSession;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The conversation driven by this server
    pub session: Arc<ConversationSession>,

    /// Latest rendered frame of the session
    pub view: Arc<SnapshotSurface>,

    /// File name offered for transcript downloads
    pub export_file: String,
}

impl AppState {
    pub fn new(session: Arc<ConversationSession>, view: Arc<SnapshotSurface>) -> Self {
        Self {
            session,
            view,
            export_file: "conversation.txt".to_string(),
        }
    }

    pub fn with_export_file(mut self, export_file: impl Into<String>) -> Self {
        self.export_file = export_file.into();
        self
    }
}
