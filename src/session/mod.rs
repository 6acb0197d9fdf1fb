//! Conversation session management
//!
//! This module provides the `ConversationSession` abstraction that manages:
//! - The turn cycle (capture → backend reply → speech) and its state machine
//! - The append-only transcript and its export
//! - End-of-interaction emotion/cost analysis
//! - Participant selection and session statistics

mod config;
mod participant;
mod session;
mod state;
mod stats;
mod transcript;

pub use config::SessionConfig;
pub use participant::ParticipantSelection;
pub use session::{ConversationSession, SessionCollaborators, TurnOutcome};
pub use state::TurnState;
pub use stats::SessionStats;
pub use transcript::{Role, Transcript, Utterance};
