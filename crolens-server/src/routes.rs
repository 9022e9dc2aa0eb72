//! HTTP API route definitions.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};

/// Create the API router. Wrong-verb requests on known paths get a 405
/// from the method router itself.
pub fn create_router(state: AppState) -> Router {
    let api_v1 = Router::new()
        .route("/health", get(handlers::health))
        .route("/analyze", post(handlers::analyze))
        .route("/scrape", post(handlers::scrape))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .nest("/api/v1", api_v1)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
