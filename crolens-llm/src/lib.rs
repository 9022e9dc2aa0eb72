//! Analysis request builder for the CRO critique.
//!
//! This crate wraps page content in a fixed instructional template,
//! sends it to a text-generation endpoint behind the [`traits::LlmClient`]
//! seam, and unwraps the model's fenced-JSON answer into a raw payload.
//! The payload is passed through as-is; validating that it parses into
//! the report shape is the presentation layer's job.

pub mod gemini;
pub mod prompt;
pub mod traits;

use crolens_common::Result;
use traits::LlmClient;

/// Default model used when the configuration does not name one.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Run one analysis round-trip: template the content, call the model,
/// strip code fences from the answer.
pub async fn run_analysis(client: &dyn LlmClient, content: &str) -> Result<String> {
    let request = prompt::build_analysis_prompt(content);
    let response = client.generate(&request).await?;

    tracing::debug!(
        target: "llm.analysis",
        model = client.model_name(),
        response_len = response.text.len(),
        tokens_used = ?response.tokens_used,
        "analysis.done"
    );

    Ok(prompt::strip_code_fences(&response.text))
}
