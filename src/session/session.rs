use super::config::SessionConfig;
use super::participant::ParticipantSelection;
use super::state::TurnState;
use super::stats::SessionStats;
use super::transcript::{Transcript, Utterance};
use crate::backend::{
    format_response_text, AnalysisRequest, AnalysisResult, ConversationBackend, TurnRequest,
};
use crate::render::{DisplaySurface, Notifier, View};
use crate::speech::{SpeechInput, SpeechOutput, SpeechRecognizer, SpeechSynthesizer};
use crate::{Error, Result};
use chrono::Utc;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// External collaborators a session drives
pub struct SessionCollaborators {
    pub backend: Arc<dyn ConversationBackend>,
    pub recognizer: Box<dyn SpeechRecognizer>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub surface: Arc<dyn DisplaySurface>,
    pub notifier: Arc<dyn Notifier>,
}

/// Result of one completed turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnOutcome {
    /// Lower-cased user utterance
    pub heard: String,
    /// Reply with formatting artifacts removed
    pub reply: String,
    /// Emotion label sent with the reply
    pub emotion: Option<String>,
}

/// What the display shows, guarded together so renders are consistent
#[derive(Default)]
struct Record {
    transcript: Transcript,
    emotion: Option<String>,
    analysis: Option<AnalysisResult>,
}

impl Record {
    fn view(&self) -> View<'_> {
        View {
            transcript: &self.transcript,
            emotion: self.emotion.as_deref(),
            analysis: self.analysis.as_ref(),
        }
    }
}

/// Holds the turn cycle in a non-idle state; returns it to idle on drop
struct TurnGuard<'a> {
    state: &'a std::sync::Mutex<TurnState>,
}

impl<'a> TurnGuard<'a> {
    fn begin(state: &'a std::sync::Mutex<TurnState>) -> Result<Self> {
        let mut current = state.lock().unwrap_or_else(PoisonError::into_inner);
        if *current != TurnState::Idle {
            return Err(Error::Busy(*current));
        }
        *current = TurnState::Listening;
        Ok(Self { state })
    }

    fn advance(&self, next: TurnState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = TurnState::Idle;
    }
}

/// Run `task` on its own tokio task and wait for it
async fn detach<T, F>(task: F) -> Result<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    match tokio::spawn(task).await {
        Ok(result) => result,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::Interrupted,
            e,
        ))),
    }
}

/// Clears the analysis flag on drop
struct AnalysisGuard<'a>(&'a AtomicBool);

impl Drop for AnalysisGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// A voice conversation with the remote service
///
/// Owns the transcript and sequences capture, backend exchange, speech and
/// rendering. Only one turn runs at a time: `start_capture` outside the
/// idle state is rejected with `Error::Busy`. Analysis is independent of
/// the turn cycle but only one analysis runs at a time.
pub struct ConversationSession {
    config: SessionConfig,
    backend: Arc<dyn ConversationBackend>,
    input: SpeechInput,
    output: SpeechOutput,
    surface: Arc<dyn DisplaySurface>,
    notifier: Arc<dyn Notifier>,
    participant: ParticipantSelection,

    /// When the session started
    started_at: chrono::DateTime<chrono::Utc>,

    /// Turn cycle position; never held across an await
    turn_state: std::sync::Mutex<TurnState>,

    /// Whether an analysis request is in flight
    analyzing: AtomicBool,

    record: Mutex<Record>,

    turns_completed: AtomicUsize,
    turns_failed: AtomicUsize,
}

impl ConversationSession {
    pub fn new(config: SessionConfig, parts: SessionCollaborators) -> Self {
        info!("Creating conversation session: {}", config.session_id);

        let input = SpeechInput::new(parts.recognizer, config.recognizer.clone());
        let output = SpeechOutput::new(parts.synthesizer, config.voice.clone());
        let participant = ParticipantSelection::new(config.default_participant);

        Self {
            config,
            backend: parts.backend,
            input,
            output,
            surface: parts.surface,
            notifier: parts.notifier,
            participant,
            started_at: Utc::now(),
            turn_state: std::sync::Mutex::new(TurnState::Idle),
            analyzing: AtomicBool::new(false),
            record: Mutex::new(Record::default()),
            turns_completed: AtomicUsize::new(0),
            turns_failed: AtomicUsize::new(0),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    /// Handle to the participant selector
    pub fn participant(&self) -> &ParticipantSelection {
        &self.participant
    }

    pub fn state(&self) -> TurnState {
        *self
            .turn_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Capture one utterance with the session's recognizer and run the turn
    ///
    /// The turn runs on its own task, so dropping the returned future does
    /// not abort the backend request; the reply is still recorded.
    pub async fn start_capture(self: &Arc<Self>) -> Result<TurnOutcome> {
        let session = Arc::clone(self);
        detach(async move {
            let turn = session.begin_turn()?;
            let heard = session.input.capture().await;
            session.complete_turn(turn, heard).await
        })
        .await
    }

    /// Run a turn from a recognizer supplied by the caller
    ///
    /// Used when recognition happens outside this process, e.g. in a
    /// browser that forwards its result.
    pub async fn capture_with(
        self: &Arc<Self>,
        recognizer: Box<dyn SpeechRecognizer>,
    ) -> Result<TurnOutcome> {
        let session = Arc::clone(self);
        detach(async move {
            let turn = session.begin_turn()?;
            let heard =
                SpeechInput::capture_with(recognizer.as_ref(), session.input.config()).await;
            session.complete_turn(turn, heard).await
        })
        .await
    }

    fn begin_turn(&self) -> Result<TurnGuard<'_>> {
        TurnGuard::begin(&self.turn_state).map_err(|e| {
            warn!("Rejecting capture: {}", e);
            self.notifier.notify(&e.user_message());
            e
        })
    }

    async fn complete_turn(
        &self,
        turn: TurnGuard<'_>,
        heard: Result<String>,
    ) -> Result<TurnOutcome> {
        let text = heard.map_err(|e| self.fail_turn(e))?;

        self.append(Utterance::user(text.clone())).await;
        turn.advance(TurnState::AwaitingReply);

        let request = TurnRequest {
            message: text.clone(),
            customer_id: self.participant.current(),
        };
        let reply = self
            .backend
            .generate(&request)
            .await
            .map_err(|e| self.fail_turn(e))?;

        let cleaned = format_response_text(&reply.response);
        {
            let mut record = self.record.lock().await;
            record.transcript.push(Utterance::bot(cleaned.clone()));
            record.emotion = reply.emotion.clone();
            self.surface.render(&record.view());
        }

        if let Err(e) = self.output.speak(&cleaned).await {
            warn!("Reply not spoken: {}", e);
        }

        self.turns_completed.fetch_add(1, Ordering::SeqCst);
        info!("Turn completed: {}", cleaned);
        drop(turn);

        Ok(TurnOutcome {
            heard: text,
            reply: cleaned,
            emotion: reply.emotion,
        })
    }

    fn fail_turn(&self, e: Error) -> Error {
        error!("Turn failed: {}", e);
        self.turns_failed.fetch_add(1, Ordering::SeqCst);
        self.notifier.notify(&e.user_message());
        e
    }

    async fn append(&self, utterance: Utterance) {
        let mut record = self.record.lock().await;
        record.transcript.push(utterance);
        self.surface.render(&record.view());
    }

    /// End-of-interaction analysis of the whole transcript
    ///
    /// On success the result replaces any previous one. On failure the user
    /// is notified and the previous result is kept. Like a turn, the request
    /// runs on its own task and survives the caller going away.
    pub async fn analyze(self: &Arc<Self>) -> Result<AnalysisResult> {
        let session = Arc::clone(self);
        detach(async move { session.run_analysis().await }).await
    }

    async fn run_analysis(&self) -> Result<AnalysisResult> {
        if self
            .analyzing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            let e = Error::AnalysisInProgress;
            warn!("{}", e);
            self.notifier.notify(&e.user_message());
            return Err(e);
        }
        let _analysis = AnalysisGuard(&self.analyzing);

        let conversation = self.record.lock().await.transcript.conversation_text();

        match self.backend.analyze(&AnalysisRequest { conversation }).await {
            Ok(result) => {
                info!(
                    "Analysis: emotion={}, sentiment={}, score={}",
                    result.dominant_emotion, result.sentiment, result.negotiation_score
                );
                let mut record = self.record.lock().await;
                record.analysis = Some(result.clone());
                self.surface.render(&record.view());
                Ok(result)
            }
            Err(e) => {
                error!("Analysis failed: {}", e);
                self.notifier.notify(&e.user_message());
                Err(e)
            }
        }
    }

    /// Speak the probe phrase; failures are only logged
    pub async fn probe_speech(&self) -> bool {
        match self.output.probe().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Speech synthesis unavailable: {}", e);
                false
            }
        }
    }

    /// Snapshot of the transcript
    pub async fn get_transcript(&self) -> Transcript {
        self.record.lock().await.transcript.clone()
    }

    /// Flat text export of the transcript
    pub async fn export(&self) -> String {
        self.record.lock().await.transcript.export()
    }

    pub async fn last_emotion(&self) -> Option<String> {
        self.record.lock().await.emotion.clone()
    }

    pub async fn analysis(&self) -> Option<AnalysisResult> {
        self.record.lock().await.analysis.clone()
    }

    /// Get current session statistics
    pub async fn get_stats(&self) -> SessionStats {
        let duration = Utc::now().signed_duration_since(self.started_at);
        let utterances_count = self.record.lock().await.transcript.len();

        SessionStats {
            session_id: self.config.session_id.clone(),
            state: self.state(),
            analyzing: self.analyzing.load(Ordering::SeqCst),
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            turns_completed: self.turns_completed.load(Ordering::SeqCst),
            turns_failed: self.turns_failed.load(Ordering::SeqCst),
            utterances_count,
        }
    }
}
