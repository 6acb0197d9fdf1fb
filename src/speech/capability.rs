use crate::Result;
use serde::{Deserialize, Serialize};

/// Recognizer configuration applied to every capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// BCP-47 locale (e.g. "es-ES")
    pub locale: String,
    /// Whether partial hypotheses are reported
    pub interim_results: bool,
    /// Number of alternatives requested per result
    pub max_alternatives: u32,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            locale: "es-ES".to_string(),
            interim_results: false,
            max_alternatives: 1,
        }
    }
}

/// Voice parameters for synthesized speech
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub locale: String,
    /// Speaking rate multiplier (1.0 = normal)
    pub rate: f32,
    /// Pitch multiplier (1.0 = normal)
    pub pitch: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            locale: "es-ES".to_string(),
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

/// One-shot speech-to-text capability
///
/// Implementations:
/// - `ConsoleRecognizer`: the next stdin line is the recognized speech
/// - `ForwardedRecognition`: a result already produced by a front end
#[async_trait::async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Listen once and return the single best transcript
    ///
    /// Fails with `Error::CapabilityUnavailable` when no recognizer exists
    /// and `Error::Recognition` when the recognizer emits an error event.
    async fn recognize(&self, config: &RecognizerConfig) -> Result<String>;

    /// Get recognizer name for logging
    fn name(&self) -> &str;
}

/// Text-to-speech capability with cancel-in-progress
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Start speaking `text`; returns once playback has begun
    async fn speak(&self, text: &str, voice: &VoiceSettings) -> Result<()>;

    /// Stop the current utterance, if any
    async fn cancel(&self) -> Result<()>;

    /// Whether an utterance is currently playing
    async fn is_speaking(&self) -> bool;

    /// Get synthesizer name for logging
    fn name(&self) -> &str;
}
