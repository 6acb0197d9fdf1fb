//! Console-backed speech capabilities
//!
//! Used by the interactive `chat` mode and by front ends that run their own
//! recognizer and only forward the result.

use super::capability::{RecognizerConfig, SpeechRecognizer, SpeechSynthesizer, VoiceSettings};
use crate::error::Capability;
use crate::{Error, Result};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// Shared line reader over stdin
///
/// The chat loop and the console recognizer both read from the same stream.
#[derive(Clone)]
pub struct ConsoleInput {
    lines: Arc<Mutex<Lines<BufReader<Stdin>>>>,
}

impl ConsoleInput {
    pub fn stdin() -> Self {
        Self {
            lines: Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines())),
        }
    }

    /// Next line, or `None` at end of input
    pub async fn next_line(&self) -> Result<Option<String>> {
        let mut lines = self.lines.lock().await;
        Ok(lines.next_line().await?)
    }
}

/// Treats the next line typed on the console as recognized speech
pub struct ConsoleRecognizer {
    input: ConsoleInput,
}

impl ConsoleRecognizer {
    pub fn new(input: ConsoleInput) -> Self {
        Self { input }
    }
}

#[async_trait::async_trait]
impl SpeechRecognizer for ConsoleRecognizer {
    async fn recognize(&self, config: &RecognizerConfig) -> Result<String> {
        print!("🎤 [{}] ", config.locale);
        std::io::stdout().flush().ok();

        match self.input.next_line().await? {
            None => Err(Error::Recognition("aborted".to_string())),
            Some(line) if line.trim().is_empty() => {
                Err(Error::Recognition("no-speech".to_string()))
            }
            Some(line) => Ok(line.trim().to_string()),
        }
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Recognition result produced elsewhere (e.g. a browser's recognizer)
///
/// Yields its result once; later captures report the recognizer as unavailable.
pub struct ForwardedRecognition {
    result: std::sync::Mutex<Option<std::result::Result<String, String>>>,
}

impl ForwardedRecognition {
    pub fn transcript(text: impl Into<String>) -> Self {
        Self {
            result: std::sync::Mutex::new(Some(Ok(text.into()))),
        }
    }

    pub fn error(code: impl Into<String>) -> Self {
        Self {
            result: std::sync::Mutex::new(Some(Err(code.into()))),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            result: std::sync::Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl SpeechRecognizer for ForwardedRecognition {
    async fn recognize(&self, _config: &RecognizerConfig) -> Result<String> {
        let taken = match self.result.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match taken {
            Some(Ok(text)) if text.trim().is_empty() => {
                Err(Error::Recognition("no-speech".to_string()))
            }
            Some(Ok(text)) => Ok(text.trim().to_string()),
            Some(Err(code)) => Err(Error::Recognition(code)),
            None => Err(Error::CapabilityUnavailable(Capability::Recognition)),
        }
    }

    fn name(&self) -> &str {
        "forwarded"
    }
}

/// Prints replies instead of voicing them
pub struct ConsoleSynthesizer;

#[async_trait::async_trait]
impl SpeechSynthesizer for ConsoleSynthesizer {
    async fn speak(&self, text: &str, voice: &VoiceSettings) -> Result<()> {
        println!("🔊 [{}] {}", voice.locale, text);
        Ok(())
    }

    async fn cancel(&self) -> Result<()> {
        Ok(())
    }

    async fn is_speaking(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Host without any speech synthesis
pub struct NoSynthesizer;

#[async_trait::async_trait]
impl SpeechSynthesizer for NoSynthesizer {
    async fn speak(&self, _text: &str, _voice: &VoiceSettings) -> Result<()> {
        Err(Error::CapabilityUnavailable(Capability::Synthesis))
    }

    async fn cancel(&self) -> Result<()> {
        Ok(())
    }

    async fn is_speaking(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "none"
    }
}
