use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a session in its turn cycle
///
/// `Idle → Listening → AwaitingReply → Idle`. Analysis runs outside this
/// cycle and is tracked separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    #[default]
    Idle,
    Listening,
    AwaitingReply,
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnState::Idle => f.write_str("idle"),
            TurnState::Listening => f.write_str("listening"),
            TurnState::AwaitingReply => f.write_str("awaiting reply"),
        }
    }
}
