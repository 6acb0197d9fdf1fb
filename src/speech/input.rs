use super::capability::{RecognizerConfig, SpeechRecognizer};
use crate::Result;
use tracing::{info, warn};

/// Speech input channel
///
/// Wraps a one-shot recognizer and normalises what it hears.
pub struct SpeechInput {
    recognizer: Box<dyn SpeechRecognizer>,
    config: RecognizerConfig,
}

impl SpeechInput {
    pub fn new(recognizer: Box<dyn SpeechRecognizer>, config: RecognizerConfig) -> Self {
        Self { recognizer, config }
    }

    /// Run one capture with the channel's own recognizer
    pub async fn capture(&self) -> Result<String> {
        Self::capture_with(self.recognizer.as_ref(), &self.config).await
    }

    /// Run one capture with an external recognizer, using the same settings
    pub async fn capture_with(
        recognizer: &dyn SpeechRecognizer,
        config: &RecognizerConfig,
    ) -> Result<String> {
        info!(
            "Capturing speech with {} (locale={})",
            recognizer.name(),
            config.locale
        );

        match recognizer.recognize(config).await {
            Ok(transcript) => {
                let text = transcript.to_lowercase();
                info!("User said: {}", text);
                Ok(text)
            }
            Err(e) => {
                warn!("Capture failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }
}
