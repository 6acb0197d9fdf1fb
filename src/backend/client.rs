use super::messages::{AnalysisRequest, AnalysisResult, TurnReply, TurnRequest};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info};

/// Remote conversational service
///
/// `BackendClient` talks HTTP; tests and alternative transports can plug in
/// their own implementation.
#[async_trait::async_trait]
pub trait ConversationBackend: Send + Sync {
    /// Ask the service for the reply to one user utterance
    async fn generate(&self, request: &TurnRequest) -> Result<TurnReply>;

    /// Ask the service for an emotion/cost analysis of a conversation
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;
}

/// Endpoint layout of the conversational service
#[derive(Debug, Clone)]
pub struct BackendEndpoints {
    pub base_url: String,
    pub turn_path: String,
    pub analysis_path: String,
}

impl Default for BackendEndpoints {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            turn_path: "/gemini/generate".to_string(),
            analysis_path: "/analyze_emotion".to_string(),
        }
    }
}

impl BackendEndpoints {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// HTTP client for the turn and analysis endpoints
pub struct BackendClient {
    client: reqwest::Client,
    endpoints: BackendEndpoints,
}

impl BackendClient {
    /// Create a client; `timeout` bounds each whole request
    pub fn new(endpoints: BackendEndpoints, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        info!("Backend at {}", endpoints.base_url);

        Ok(Self {
            client: builder.build()?,
            endpoints,
        })
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoints.url(path);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            Error::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "Backend returned {} {} for {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
                path
            );
            return Err(Error::Server {
                status: status.as_u16(),
                endpoint: path.to_string(),
            });
        }

        let parsed = response.json::<R>().await.map_err(|e| {
            error!("Malformed reply from {}: {}", url, e);
            Error::Network(e)
        })?;

        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl ConversationBackend for BackendClient {
    async fn generate(&self, request: &TurnRequest) -> Result<TurnReply> {
        info!(
            "Sending turn for participant {} ({} chars)",
            request.customer_id,
            request.message.chars().count()
        );

        let reply: TurnReply = self.post_json(&self.endpoints.turn_path, request).await?;
        debug!("Backend reply: {:?}", reply);

        Ok(reply)
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        info!(
            "Requesting analysis ({} chars)",
            request.conversation.chars().count()
        );

        let result: AnalysisResult = self
            .post_json(&self.endpoints.analysis_path, request)
            .await?;
        debug!("Analysis result: {:?}", result);

        Ok(result)
    }
}
