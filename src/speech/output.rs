use super::capability::{SpeechSynthesizer, VoiceSettings};
use crate::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Phrase spoken when checking that synthesis works
pub const PROBE_PHRASE: &str = "Esto es una prueba de voz.";

/// Speech output channel
///
/// At most one utterance plays at a time: a new `speak` cancels whatever
/// is playing instead of queueing behind it.
pub struct SpeechOutput {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    voice: VoiceSettings,
    /// Serialises cancel+speak so two callers cannot both start playback
    gate: Mutex<()>,
}

impl SpeechOutput {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, voice: VoiceSettings) -> Self {
        Self {
            synthesizer,
            voice,
            gate: Mutex::new(()),
        }
    }

    /// Preempt any current utterance and speak `text`
    pub async fn speak(&self, text: &str) -> Result<()> {
        let _guard = self.gate.lock().await;

        if self.synthesizer.is_speaking().await {
            debug!("Cancelling previous utterance");
            if let Err(e) = self.synthesizer.cancel().await {
                warn!("Failed to cancel previous utterance: {}", e);
            }
        }

        self.synthesizer.speak(text, &self.voice).await
    }

    /// Speak the probe phrase to check the synthesizer
    pub async fn probe(&self) -> Result<()> {
        info!("Probing speech synthesis with {}", self.synthesizer.name());
        self.speak(PROBE_PHRASE).await
    }
}
