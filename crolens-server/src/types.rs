//! JSON-serializable types for the HTTP API.

use crolens_scrape::ScrapedPage;
use serde::{Deserialize, Serialize};

/// Analyze request body: pasted text or a URL, never both required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text_to_analyze: Option<String>,
    #[serde(default)]
    pub url_to_analyze: Option<String>,
}

/// Scrape request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Scrape response: the typed snapshot plus the normalized document
/// ready for prompting.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResponse {
    pub success: bool,
    pub scraped_data: ScrapedPage,
    pub content_for_analysis: String,
    pub message: String,
}

/// Structured error body returned for every failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: String,
}
