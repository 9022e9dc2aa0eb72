//! Pipeline orchestration: URL or text in, raw report JSON out.

use std::sync::Arc;
use std::time::Duration;

use crolens_common::{CrolensError, Result};
use crolens_config::{CrolensConfig, LlmConfig};
use crolens_llm::gemini::GeminiClient;
use crolens_llm::traits::LlmClient;
use crolens_scrape::{extract_page, normalize_page, FetchOptions, PageFetcher, ScrapedPage};

/// One pipeline run per call; no state is shared between runs beyond
/// the immutable clients, so any number may execute concurrently.
#[derive(Clone)]
pub struct AnalysisService {
    fetcher: PageFetcher,
    llm: Option<Arc<dyn LlmClient>>,
}

impl AnalysisService {
    pub fn new(fetcher: PageFetcher, llm: Option<Arc<dyn LlmClient>>) -> Self {
        Self { fetcher, llm }
    }

    /// Build the service from loaded configuration. The credential is
    /// read here, once, and held immutable for the process lifetime; a
    /// missing key leaves the server running but failing analysis
    /// requests with a configuration error.
    pub fn from_config(config: &CrolensConfig) -> Result<Self> {
        let fetcher = PageFetcher::new(FetchOptions {
            timeout: Duration::from_secs(config.scrape.timeout_secs),
            max_redirects: config.scrape.max_redirects,
            user_agent: config.scrape.user_agent.clone(),
        })?;

        let llm: Option<Arc<dyn LlmClient>> = match &config.llm {
            Some(LlmConfig::Gemini { api_key, model }) if credential_usable(api_key) => {
                Some(Arc::new(GeminiClient::new(api_key.clone(), model.clone())?))
            }
            _ => {
                tracing::warn!(
                    "Gemini API key is not configured; analysis requests will be rejected"
                );
                None
            }
        };

        Ok(Self::new(fetcher, llm))
    }

    /// Fetch, extract, and normalize a single landing page.
    pub async fn scrape(&self, raw_url: &str) -> Result<(ScrapedPage, String)> {
        let fetched = self.fetcher.fetch(raw_url).await?;
        let page = extract_page(&fetched.body, raw_url.trim());
        let content = normalize_page(&page);
        Ok((page, content))
    }

    /// Run the full analysis: scrape if a URL was given, then prompt the
    /// model and return its raw (fence-stripped) JSON payload.
    pub async fn analyze(
        &self,
        text_to_analyze: Option<&str>,
        url_to_analyze: Option<&str>,
    ) -> Result<String> {
        let text = non_empty(text_to_analyze);
        let url = non_empty(url_to_analyze);
        if text.is_none() && url.is_none() {
            return Err(CrolensError::MissingInput);
        }

        let llm = self
            .llm
            .as_deref()
            .ok_or_else(|| CrolensError::Config("Gemini API key is missing".to_string()))?;

        // a URL wins when both are supplied; the UI only ever sends one
        let content = match url {
            Some(url) => self.scrape(url).await?.1,
            None => text.unwrap_or_default().to_string(),
        };

        crolens_llm::run_analysis(llm, &content).await
    }
}

fn credential_usable(api_key: &str) -> bool {
    // an unexpanded ${VAR} placeholder means the secret was never set
    !api_key.trim().is_empty() && !api_key.contains("${")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_placeholder_credentials_are_rejected() {
        assert!(!credential_usable(""));
        assert!(!credential_usable("   "));
        assert!(!credential_usable("${GEMINI_API_KEY}"));
        assert!(credential_usable("AIza-real-key"));
    }

    #[test]
    fn whitespace_only_input_counts_as_absent() {
        assert_eq!(non_empty(Some("  ")), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(" text ")), Some("text"));
    }
}
