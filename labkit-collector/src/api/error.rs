//! API Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::report;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Body was not a JSON object of the submission shape
    MalformedSubmission(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // The wire contract is a bare 400: the reason stays on the console.
            ApiError::MalformedSubmission(reason) => {
                report::announce_rejection(&reason);
                StatusCode::BAD_REQUEST.into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
