use crate::backend::BackendEndpoints;
use crate::session::SessionConfig;
use crate::speech::{
    CommandSynthesizer, ConsoleSynthesizer, NoSynthesizer, RecognizerConfig, SpeechSynthesizer,
    VoiceSettings,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Default configuration file, extension inferred
pub const DEFAULT_CONFIG_PATH: &str = "config/conversa";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub backend: BackendConfig,
    pub speech: SpeechConfig,
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub turn_path: String,
    pub analysis_path: String,
    /// Whole-request timeout; unset means wait indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesizerKind {
    /// Print replies to the terminal
    Console,
    /// Spawn an espeak-compatible command
    Command,
    /// No synthesis available
    None,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    pub locale: String,
    pub rate: f32,
    pub pitch: f32,
    pub synthesizer: SynthesizerKind,
    /// Program used when `synthesizer = "command"`
    pub command: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub default_participant: i64,
    pub export_file: String,
}

impl Config {
    /// Load defaults, then `path` (if present), then `CONVERSA__*` env vars
    ///
    /// e.g. `CONVERSA__BACKEND__BASE_URL=http://10.0.0.5:8000`
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "conversa")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 8700_i64)?
            .set_default("backend.base_url", "http://127.0.0.1:8000")?
            .set_default("backend.turn_path", "/gemini/generate")?
            .set_default("backend.analysis_path", "/analyze_emotion")?
            .set_default("speech.locale", "es-ES")?
            .set_default("speech.rate", 1.0)?
            .set_default("speech.pitch", 1.0)?
            .set_default("speech.synthesizer", "console")?
            .set_default("speech.command", "espeak-ng")?
            .set_default("session.default_participant", 1_i64)?
            .set_default("session.export_file", "conversation.txt")?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("CONVERSA").separator("__"))
            .build()
            .with_context(|| format!("Failed to load config from {path}"))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn endpoints(&self) -> BackendEndpoints {
        BackendEndpoints {
            base_url: self.backend.base_url.clone(),
            turn_path: self.backend.turn_path.clone(),
            analysis_path: self.backend.analysis_path.clone(),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.backend.timeout_secs.map(Duration::from_secs)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            recognizer: RecognizerConfig {
                locale: self.speech.locale.clone(),
                ..RecognizerConfig::default()
            },
            voice: VoiceSettings {
                locale: self.speech.locale.clone(),
                rate: self.speech.rate,
                pitch: self.speech.pitch,
            },
            default_participant: self.session.default_participant,
            ..SessionConfig::default()
        }
    }

    pub fn synthesizer(&self) -> Arc<dyn SpeechSynthesizer> {
        match self.speech.synthesizer {
            SynthesizerKind::Console => Arc::new(ConsoleSynthesizer),
            SynthesizerKind::Command => Arc::new(CommandSynthesizer::new(&self.speech.command)),
            SynthesizerKind::None => Arc::new(NoSynthesizer),
        }
    }
}
