//! Error types for conversa

use thiserror::Error;

use crate::session::TurnState;

/// Result type alias for conversa operations
pub type Result<T> = std::result::Result<T, Error>;

/// External capability a session depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Speech-to-text
    Recognition,
    /// Text-to-speech
    Synthesis,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recognition => f.write_str("speech recognition"),
            Self::Synthesis => f.write_str("speech synthesis"),
        }
    }
}

/// Errors that can occur in a conversation session
#[derive(Debug, Error)]
pub enum Error {
    /// Recognizer or synthesizer missing on this host
    #[error("{0} capability unavailable")]
    CapabilityUnavailable(Capability),

    /// The recognizer reported an error event (e.g. "no-speech")
    #[error("recognition failed: {0}")]
    Recognition(String),

    /// Transport-level failure talking to the backend
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("server error {status} from {endpoint}")]
    Server { status: u16, endpoint: String },

    /// A capture was requested while another turn is in flight
    #[error("session busy: {0}")]
    Busy(TurnState),

    /// An analysis request is already running
    #[error("analysis already in progress")]
    AnalysisInProgress,

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Notice shown to the person using the client
    pub fn user_message(&self) -> String {
        match self {
            Self::CapabilityUnavailable(Capability::Recognition) => {
                "El reconocimiento de voz no está disponible en este equipo.".to_string()
            }
            Self::CapabilityUnavailable(Capability::Synthesis) => {
                "La síntesis de voz no está disponible en este equipo.".to_string()
            }
            Self::Recognition(code) => format!("Error al capturar el audio: {code}"),
            Self::Server { .. } => {
                "Hubo un problema al procesar tu solicitud. Intenta nuevamente.".to_string()
            }
            Self::Network(_) => {
                "No se pudo conectar con el servidor. Verifica tu conexión e intenta de nuevo."
                    .to_string()
            }
            Self::Busy(_) => "Espera a que termine la respuesta anterior.".to_string(),
            Self::AnalysisInProgress => "El análisis de la conversación ya está en curso.".to_string(),
            Self::Io(_) => format!("Error interno: {self}"),
        }
    }
}
