use async_trait::async_trait;
use crolens_common::Result;

/// Text returned by a generation endpoint, plus whatever usage metadata
/// the provider reports.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub model: Option<String>,
    pub tokens_used: Option<u32>,
}

/// Seam between the analysis pipeline and a concrete provider.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<LlmResponse>;

    /// Model identifier used for logging.
    fn model_name(&self) -> &str;
}
