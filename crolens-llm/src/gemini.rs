use crate::traits::{LlmClient, LlmResponse};
use async_trait::async_trait;
use crolens_common::{CrolensError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiUsageMetadata {
    #[serde(rename = "totalTokenCount")]
    total_token_count: Option<u32>,
}

// Error envelope: {"error":{"message":"..."}}
#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

/// Google Gemini API client.
///
/// The credential is passed as a query parameter, never as a header and
/// never logged. One request per invocation; no retries.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client using the provided API key and model.
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| CrolensError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: GEMINI_BASE_URL.to_string(),
            api_key,
            model,
        })
    }

    /// Point the client at a different endpoint (tests, gateways).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<LlmResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(model = %self.model, "sending Gemini request");

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| CrolensError::Upstream(format!("Gemini request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiErrorEnvelope>(&body)
                .map(|env| env.error.message)
                .unwrap_or_else(|_| format!("Gemini API error ({status})"));
            tracing::warn!(%status, %message, "Gemini request rejected");
            return Err(CrolensError::Upstream(message));
        }

        let gemini_response: GeminiResponse = resp
            .json()
            .await
            .map_err(|e| CrolensError::Upstream(format!("failed to parse Gemini response: {e}")))?;

        let text = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| {
                CrolensError::Upstream("no content returned from Gemini".to_string())
            })?;

        let tokens_used = gemini_response
            .usage_metadata
            .and_then(|u| u.total_token_count);

        Ok(LlmResponse {
            text,
            model: Some(self.model.clone()),
            tokens_used,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
