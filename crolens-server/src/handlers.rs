//! Handlers that map HTTP requests to pipeline operations.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use crolens_common::CrolensError;

use crate::service::AnalysisService;
use crate::types::{AnalyzeRequest, ErrorBody, HealthResponse, ScrapeRequest, ScrapeResponse};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnalysisService>,
}

/// Boundary wrapper turning every pipeline error into a `{message}`
/// body plus status code.
pub struct ApiError(pub CrolensError);

impl From<CrolensError> for ApiError {
    fn from(err: CrolensError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        tracing::warn!(status = %status, error = %self.0, "request failed");
        let body = ErrorBody {
            message: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// `POST /api/v1/analyze` — run the full pipeline and pass the model's
/// raw JSON payload through untouched.
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Response, ApiError> {
    let payload = state
        .service
        .analyze(req.text_to_analyze.as_deref(), req.url_to_analyze.as_deref())
        .await?;

    // the payload is already JSON text; re-serializing would double-encode it
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        payload,
    )
        .into_response())
}

/// `POST /api/v1/scrape` — fetch and normalize a page without analyzing it.
pub async fn scrape(
    State(state): State<AppState>,
    Json(req): Json<ScrapeRequest>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let url = req
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| {
            CrolensError::InvalidInput("No URL provided for scraping.".to_string())
        })?;

    let (scraped_data, content_for_analysis) = state.service.scrape(url).await?;

    Ok(Json(ScrapeResponse {
        success: true,
        scraped_data,
        content_for_analysis,
        message: "Website content successfully scraped and prepared for analysis".to_string(),
    }))
}

/// `GET /api/v1/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
