//! Common types shared across the Crolens workspace.
//!
//! This crate defines the error taxonomy used by every pipeline stage,
//! the user-facing message and HTTP status mapping applied at the
//! service boundary, and the centralised `tracing` initialisation in
//! [`observability`]. It is intentionally lightweight so that all crates
//! can depend on it without heavy transitive costs.
//!
//! # Overview
//!
//! - [`CrolensError`] and [`Result`]: shared error handling
//! - [`observability`]: tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use crolens_common::CrolensError;
//!
//! let err = CrolensError::MissingInput;
//! assert_eq!(err.status_code(), 400);
//! assert_eq!(err.user_message(), "No text or URL provided for analysis.");
//! ```

pub mod observability;

/// Error types used across the Crolens pipeline.
///
/// Every error is eventually caught at the service boundary and turned
/// into a `{message}` body plus status code via [`CrolensError::user_message`]
/// and [`CrolensError::status_code`]; nothing propagates as an unhandled
/// fault.
#[derive(thiserror::Error, Debug)]
pub enum CrolensError {
    /// Malformed or missing user input (bad URL, empty request body).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Neither pasted text nor a URL was supplied for analysis.
    #[error("no text or URL provided")]
    MissingInput,

    /// DNS resolution for the target site failed.
    #[error("host not found: {0}")]
    HostNotFound(String),

    /// The target site did not respond within the fetch timeout.
    #[error("fetch timed out")]
    Timeout,

    /// The target site answered 403 to our request.
    #[error("access denied by target site")]
    AccessDenied,

    /// The target page answered 404.
    #[error("target page not found")]
    NotFound,

    /// Any other transport failure or non-2xx status while fetching.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Server-side configuration was incomplete (missing API key).
    #[error("configuration error: {0}")]
    Config(String),

    /// The model endpoint rejected the analysis request.
    #[error("upstream model error: {0}")]
    Upstream(String),
}

impl CrolensError {
    /// HTTP-style status code reported to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) | Self::MissingInput | Self::HostNotFound(_) => 400,
            Self::AccessDenied => 403,
            Self::NotFound => 404,
            Self::Timeout => 408,
            Self::Fetch(_) | Self::Config(_) | Self::Upstream(_) => 500,
        }
    }

    /// User-facing message for the `{message}` error body.
    ///
    /// Scrape-reachability errors use fixed, user-correctable wording;
    /// upstream errors carry the endpoint's own message through.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::MissingInput => "No text or URL provided for analysis.".to_string(),
            Self::HostNotFound(_) => {
                "Website not found. Please check the URL and try again.".to_string()
            }
            Self::Timeout => {
                "Request timeout. The website took too long to respond.".to_string()
            }
            Self::AccessDenied => {
                "Access denied. This website blocks automated requests.".to_string()
            }
            Self::NotFound => "Website not found (404 error).".to_string(),
            Self::Fetch(_) => {
                "Failed to scrape website. Please try again or contact support.".to_string()
            }
            Self::Config(_) => "Server configuration error: API key is missing.".to_string(),
            Self::Upstream(msg) => msg.clone(),
        }
    }
}

/// Convenient alias for results that use [`CrolensError`].
pub type Result<T> = std::result::Result<T, CrolensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_not_found_maps_to_400_with_website_not_found_message() {
        let err = CrolensError::HostNotFound("nosuchhost.example".into());
        assert_eq!(err.status_code(), 400);
        assert!(err.user_message().contains("Website not found"));
    }

    #[test]
    fn missing_input_maps_to_400() {
        let err = CrolensError::MissingInput;
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.user_message(), "No text or URL provided for analysis.");
    }

    #[test]
    fn scrape_failures_map_to_their_status_codes() {
        assert_eq!(CrolensError::AccessDenied.status_code(), 403);
        assert_eq!(CrolensError::NotFound.status_code(), 404);
        assert_eq!(CrolensError::Timeout.status_code(), 408);
        assert_eq!(CrolensError::Fetch("boom".into()).status_code(), 500);
    }

    #[test]
    fn upstream_message_passes_through() {
        let err = CrolensError::Upstream("API key expired".into());
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.user_message(), "API key expired");
    }
}
