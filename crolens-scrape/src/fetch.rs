//! HTML fetcher for scrape targets.
//!
//! A single GET attempt per invocation: the caller decides whether to
//! retry. The request timeout is the only cancellation mechanism in the
//! pipeline. No cookies or auth are ever sent to a target site.

use std::error::Error as StdError;
use std::time::Duration;

use crolens_common::{CrolensError, Result};
use reqwest::redirect::Policy;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_REDIRECTS: usize = 5;
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Tuning for the outbound fetch. Defaults match the production values;
/// tests shrink the timeout.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Raw response body plus status for a fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: String,
    pub status: u16,
}

/// HTTP fetcher for scrape targets.
///
/// Cheap to clone; holds only a `reqwest::Client`.
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Build a fetcher with a browser-like user agent, a redirect cap,
    /// and a whole-request timeout.
    pub fn new(opts: FetchOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(opts.timeout)
            .redirect(Policy::limited(opts.max_redirects))
            .user_agent(opts.user_agent)
            .build()
            .map_err(|e| CrolensError::Fetch(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Issue a single GET for `raw_url` and return the response body.
    ///
    /// Failure modes map to distinct error kinds: DNS failure →
    /// `HostNotFound`, timeout → `Timeout`, 403 → `AccessDenied`,
    /// 404 → `NotFound`, anything else → `Fetch`.
    pub async fn fetch(&self, raw_url: &str) -> Result<FetchedPage> {
        let url = parse_target_url(raw_url)?;
        let host = url.host_str().unwrap_or_default().to_string();

        tracing::debug!(target: "scrape.fetch", url = %url, "fetch.start");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e, &host))?;

        let status = resp.status();
        match status.as_u16() {
            403 => return Err(CrolensError::AccessDenied),
            404 => return Err(CrolensError::NotFound),
            s if !status.is_success() => {
                return Err(CrolensError::Fetch(format!(
                    "target responded with status {s}"
                )))
            }
            _ => {}
        }

        let body = resp
            .text()
            .await
            .map_err(|e| classify_transport_error(&e, &host))?;

        tracing::debug!(
            target: "scrape.fetch",
            status = status.as_u16(),
            body_len = body.len(),
            "fetch.done"
        );

        Ok(FetchedPage {
            body,
            status: status.as_u16(),
        })
    }
}

/// Validate that the input parses as an absolute http(s) URL.
pub fn parse_target_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|_| CrolensError::InvalidInput("Invalid URL format.".to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(CrolensError::InvalidInput("Invalid URL format.".to_string())),
    }
}

fn classify_transport_error(err: &reqwest::Error, host: &str) -> CrolensError {
    if err.is_timeout() {
        return CrolensError::Timeout;
    }
    if err.is_connect() && chain_mentions_dns_failure(err) {
        return CrolensError::HostNotFound(host.to_string());
    }
    CrolensError::Fetch(err.to_string())
}

// reqwest surfaces DNS failures as connect errors; the resolver detail
// only shows up in the source chain.
fn chain_mentions_dns_failure(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string().to_ascii_lowercase();
        if text.contains("dns") || text.contains("lookup") || text.contains("resolve") {
            return true;
        }
        source = cause.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_urls() {
        let err = parse_target_url("not a url").unwrap_err();
        assert!(matches!(err, CrolensError::InvalidInput(_)));
        assert_eq!(err.user_message(), "Invalid URL format.");
    }

    #[test]
    fn rejects_non_http_schemes() {
        let err = parse_target_url("ftp://example.com/file").unwrap_err();
        assert!(matches!(err, CrolensError::InvalidInput(_)));
    }

    #[test]
    fn accepts_http_and_https() {
        assert!(parse_target_url("http://example.com").is_ok());
        assert!(parse_target_url("https://example.com/pricing?x=1").is_ok());
        // surrounding whitespace from copy-paste is tolerated
        assert!(parse_target_url("  https://example.com  ").is_ok());
    }
}
