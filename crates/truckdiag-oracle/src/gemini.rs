//! Gemini REST client
//!
//! Implements [`DiagnosisOracle`] over `models/{model}:generateContent`.

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::config::OracleConfig;
use crate::error::OracleError;
use crate::oracle::{ChatRequest, DiagnosisOracle, StructuredRequest};
use crate::wire::{self, GenerateContentRequest, GenerateContentResponse};
use crate::Result;

const USER_AGENT: &str = concat!("truckdiag-oracle/", env!("CARGO_PKG_VERSION"));

/// Gemini client for structured diagnosis and chat
pub struct GeminiClient {
    api_key: String,
    model: String,
    endpoint: String,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new client
    ///
    /// Returns `OracleError::NotConfigured` when the config has no key.
    pub fn new(config: OracleConfig) -> Result<Self> {
        let api_key = config.api_key.ok_or(OracleError::NotConfigured)?;
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(GeminiClient {
            api_key,
            model: config.model,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Create client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(OracleConfig::from_env())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    async fn generate(&self, body: &GenerateContentRequest) -> Result<String> {
        let response = self
            .http_client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Gemini request failed");
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed.into_text()
    }
}

#[async_trait]
impl DiagnosisOracle for GeminiClient {
    #[instrument(skip(self, request), fields(model = %self.model, has_image = request.image.is_some()))]
    async fn generate_structured(&self, request: StructuredRequest) -> Result<serde_json::Value> {
        let text = self.generate(&wire::structured_body(&request)).await?;
        debug!(bytes = text.len(), "structured response received");
        Ok(serde_json::from_str(&text)?)
    }

    #[instrument(skip(self, request), fields(model = %self.model, turns = request.history.len()))]
    async fn chat(&self, request: ChatRequest) -> Result<String> {
        self.generate(&wire::chat_body(&request)).await
    }
}
