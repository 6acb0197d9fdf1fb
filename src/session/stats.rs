use super::state::TurnState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics about a conversation session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Session identifier
    pub session_id: String,

    /// Where the turn cycle currently is
    pub state: TurnState,

    /// Whether an analysis request is in flight
    pub analyzing: bool,

    /// When the session started
    pub started_at: DateTime<Utc>,

    /// Total duration in seconds
    pub duration_secs: f64,

    /// Turns that ended with a bot reply
    pub turns_completed: usize,

    /// Captures or turn requests that failed
    pub turns_failed: usize,

    /// Number of utterances in the transcript
    pub utterances_count: usize,
}
