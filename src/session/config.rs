use crate::speech::{RecognizerConfig, VoiceSettings};
use serde::{Deserialize, Serialize};

/// Configuration for a conversation session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "conversation-<uuid>")
    pub session_id: String,

    /// Recognizer settings used for every capture
    pub recognizer: RecognizerConfig,

    /// Voice used for replies
    pub voice: VoiceSettings,

    /// Participant selected when the session starts
    pub default_participant: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("conversation-{}", uuid::Uuid::new_v4()),
            recognizer: RecognizerConfig::default(),
            voice: VoiceSettings::default(),
            default_participant: 1,
        }
    }
}
