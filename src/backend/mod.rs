pub mod client;
pub mod messages;

pub use client::{BackendClient, BackendEndpoints, ConversationBackend};
pub use messages::{format_response_text, AnalysisRequest, AnalysisResult, TurnReply, TurnRequest};
