//! Submission API Handlers

use axum::{
    Json,
    body::Bytes,
    http::{
        StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
    },
    response::{IntoResponse, Response},
};
use labkit_core::{Acknowledgement, Submission};

use crate::api::error::{ApiError, ApiResult};
use crate::report;

/// POST /
/// Print a trainee's submission and acknowledge it
///
/// The body is parsed by hand rather than through the `Json` extractor so that
/// every malformed body (bad JSON, invalid UTF-8, wrong shape) gets the same
/// empty 400, whatever `Content-Type` the browser sent.
pub async fn receive_submission(body: Bytes) -> ApiResult<Response> {
    let submission: Submission = serde_json::from_slice(&body)
        .map_err(|e| ApiError::MalformedSubmission(e.to_string()))?;

    tracing::info!(
        "Received submission from {} ({} bytes of logs)",
        submission.trainee_name(),
        submission.log_text().len()
    );
    report::announce(&submission);

    Ok((
        [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(Acknowledgement::received()),
    )
        .into_response())
}

/// OPTIONS /
/// CORS preflight for the results page's `fetch`
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}
