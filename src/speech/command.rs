use super::capability::{SpeechSynthesizer, VoiceSettings};
use crate::error::Capability;
use crate::{Error, Result};
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// espeak's default speaking rate in words per minute
const BASE_WPM: f32 = 175.0;

/// espeak's default pitch on its 0-99 scale
const BASE_PITCH: f32 = 50.0;

/// Speaks through an espeak-compatible command (`espeak-ng`, `espeak`)
///
/// Each utterance is a child process; cancelling kills it.
pub struct CommandSynthesizer {
    program: String,
    current: Mutex<Option<Child>>,
}

impl CommandSynthesizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            current: Mutex::new(None),
        }
    }

    /// Command-line arguments for one utterance
    pub fn args(text: &str, voice: &VoiceSettings) -> Vec<String> {
        let language = voice
            .locale
            .split(['-', '_'])
            .next()
            .unwrap_or("es")
            .to_lowercase();
        let wpm = (BASE_WPM * voice.rate).round().max(80.0) as u32;
        let pitch = (BASE_PITCH * voice.pitch).round().clamp(0.0, 99.0) as u32;

        vec![
            "-v".to_string(),
            language,
            "-s".to_string(),
            wpm.to_string(),
            "-p".to_string(),
            pitch.to_string(),
            text.to_string(),
        ]
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for CommandSynthesizer {
    async fn speak(&self, text: &str, voice: &VoiceSettings) -> Result<()> {
        let mut current = self.current.lock().await;

        if let Some(mut previous) = current.take() {
            if let Err(e) = previous.start_kill() {
                debug!("Previous utterance already finished: {}", e);
            }
        }

        let child = Command::new(&self.program)
            .args(Self::args(text, voice))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    warn!("Speech command not found: {}", self.program);
                    Error::CapabilityUnavailable(Capability::Synthesis)
                } else {
                    Error::Io(e)
                }
            })?;

        info!("Speaking with {} (pid={:?})", self.program, child.id());
        *current = Some(child);

        Ok(())
    }

    async fn cancel(&self) -> Result<()> {
        let mut current = self.current.lock().await;

        if let Some(mut child) = current.take() {
            if child.try_wait()?.is_none() {
                child.kill().await?;
                debug!("Cancelled utterance");
            }
        }

        Ok(())
    }

    async fn is_speaking(&self) -> bool {
        let mut current = self.current.lock().await;

        match current.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    fn name(&self) -> &str {
        &self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_for_default_voice() {
        let args = CommandSynthesizer::args("hola", &VoiceSettings::default());
        assert_eq!(args, ["-v", "es", "-s", "175", "-p", "50", "hola"]);
    }

    #[test]
    fn test_args_scale_rate_and_pitch() {
        let voice = VoiceSettings {
            locale: "en_GB".to_string(),
            rate: 2.0,
            pitch: 3.0,
        };
        let args = CommandSynthesizer::args("hi", &voice);
        assert_eq!(args, ["-v", "en", "-s", "350", "-p", "99", "hi"]);
    }

    #[tokio::test]
    async fn test_missing_program_is_capability_unavailable() {
        let synth = CommandSynthesizer::new("conversa-no-such-tts-binary");
        let err = synth
            .speak("hola", &VoiceSettings::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::CapabilityUnavailable(Capability::Synthesis)
        ));
        assert!(!synth.is_speaking().await);
    }
}
