//! Shared test utilities: scripted speech capabilities and recording surfaces
#![allow(dead_code)]

use conversa::render::{project, DisplaySurface, Notifier, View};
use conversa::{
    BackendClient, BackendEndpoints, Capability, ConversationSession, Error, RecognizerConfig,
    Result, SessionCollaborators, SessionConfig, SpeechRecognizer, SpeechSynthesizer,
    VoiceSettings,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

/// Recognizer that replays scripted results, one per capture
///
/// `Ok(text)` is recognized speech, `Err(code)` a recognition error event.
/// When the script runs out the recognizer reports itself unavailable.
#[derive(Default)]
pub struct ScriptedRecognizer {
    script: Mutex<VecDeque<std::result::Result<String, String>>>,
}

impl ScriptedRecognizer {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(phrases.into_iter().map(|p| Ok(p.into())).collect()),
        }
    }

    pub fn failing(code: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::from([Err(code.to_string())])),
        }
    }
}

#[async_trait::async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn recognize(&self, config: &RecognizerConfig) -> Result<String> {
        assert!(!config.interim_results);
        assert_eq!(config.max_alternatives, 1);

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(code)) => Err(Error::Recognition(code)),
            None => Err(Error::CapabilityUnavailable(Capability::Recognition)),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Synthesizer that records what it was asked to say
#[derive(Default)]
pub struct RecordingSynthesizer {
    pub spoken: Mutex<Vec<String>>,
    pub cancels: AtomicUsize,
    active: AtomicUsize,
}

impl RecordingSynthesizer {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for RecordingSynthesizer {
    async fn speak(&self, text: &str, voice: &VoiceSettings) -> Result<()> {
        assert_eq!(voice.rate, 1.0);
        assert_eq!(voice.pitch, 1.0);
        self.active.store(1, Ordering::SeqCst);
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn cancel(&self) -> Result<()> {
        self.cancels.fetch_add(1, Ordering::SeqCst);
        self.active.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn is_speaking(&self) -> bool {
        self.active.load(Ordering::SeqCst) > 0
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Collects user-visible notifications
#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Collects every rendered frame
#[derive(Default)]
pub struct RecordingSurface {
    pub frames: Mutex<Vec<String>>,
}

impl RecordingSurface {
    pub fn frames(&self) -> Vec<String> {
        self.frames.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.frames.lock().unwrap().last().cloned()
    }
}

impl DisplaySurface for RecordingSurface {
    fn render(&self, view: &View<'_>) {
        self.frames.lock().unwrap().push(project(view));
    }
}

/// A session wired to a mock backend and recording collaborators
pub struct Harness {
    pub session: Arc<ConversationSession>,
    pub synthesizer: Arc<RecordingSynthesizer>,
    pub notifier: Arc<RecordingNotifier>,
    pub surface: Arc<RecordingSurface>,
}

pub fn backend_for(server: &MockServer) -> BackendClient {
    let endpoints = BackendEndpoints {
        base_url: server.uri(),
        ..BackendEndpoints::default()
    };
    BackendClient::new(endpoints, None).expect("failed to build backend client")
}

pub fn harness(server: &MockServer, recognizer: ScriptedRecognizer) -> Harness {
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let surface = Arc::new(RecordingSurface::default());

    let session = ConversationSession::new(
        SessionConfig {
            session_id: "test-conversation".to_string(),
            ..SessionConfig::default()
        },
        SessionCollaborators {
            backend: Arc::new(backend_for(server)),
            recognizer: Box::new(recognizer),
            synthesizer: synthesizer.clone(),
            surface: surface.clone(),
            notifier: notifier.clone(),
        },
    );

    Harness {
        session: Arc::new(session),
        synthesizer,
        notifier,
        surface,
    }
}
