//! API Module
//!
//! HTTP layer of the collector. A single path is served: `POST /` for
//! submissions and `OPTIONS /` for the browser's CORS preflight. Any other
//! request gets axum's default rejection.

pub mod error;
pub mod submission;

use axum::{Router, routing::post};
use tower_http::trace::TraceLayer;

/// Create the collector router
pub fn create_router() -> Router {
    Router::new()
        .route(
            "/",
            post(submission::receive_submission).options(submission::preflight),
        )
        .layer(TraceLayer::new_for_http())
}
