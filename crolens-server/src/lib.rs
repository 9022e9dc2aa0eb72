//! HTTP boundary for the CRO analysis pipeline.
//!
//! A thin axum server in front of the stateless pipeline: requests carry
//! either pasted text or a URL, responses carry the raw model report or
//! a `{message}` error body with the matching status code. Every error
//! is converted at this boundary; nothing propagates as an unhandled
//! fault.

pub mod handlers;
pub mod routes;
pub mod service;
pub mod types;

pub use routes::create_router;
pub use service::AnalysisService;
