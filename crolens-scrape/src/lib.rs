//! Content extraction and normalization for landing-page analysis.
//!
//! - Page fetch over HTTP with timeout/redirect/user-agent controls (`fetch`)
//! - Structural extraction of typed fields from HTML (`extract`)
//! - Deterministic assembly of a bounded plain-text document (`normalize`)
//!
//! Each stage is independent: `extract` and `normalize` are pure functions
//! of their input, so a pipeline run is stateless and safe to execute
//! concurrently with any number of others.

pub mod extract;
pub mod fetch;
pub mod normalize;

pub use extract::{extract_page, FormInput, FormSummary, Headings, Link, ScrapedPage};
pub use fetch::{FetchOptions, FetchedPage, PageFetcher};
pub use normalize::normalize_page;
