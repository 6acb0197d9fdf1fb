use serde::{Deserialize, Serialize};

/// Turn request sent to `POST /gemini/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRequest {
    pub message: String,
    /// Selected participant
    pub customer_id: i64,
}

/// Reply to a turn request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReply {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

/// Analysis request sent to `POST /analyze_emotion`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Whole transcript, space-joined
    pub conversation: String,
}

/// Emotion and cost analysis of a finished conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(rename = "emotion")]
    pub dominant_emotion: String,
    pub sentiment: String,
    /// 0-100
    pub negotiation_score: f64,
    pub tokens_used: u64,
    pub estimated_cost: f64,
}

/// Strip the markdown emphasis asterisks the model puts in replies
pub fn format_response_text(text: &str) -> String {
    text.replace('*', "")
}
