//! JSON response envelope and error-to-status mapping.
//!
//! Every failure leaves the process as `{"success": false, "error": ...}`;
//! storage and unexpected errors are logged in full here and reach the
//! client only as a short generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::{error, warn};

use services::SubmitError;

#[derive(Debug)]
pub enum ApiError {
    /// 400: malformed or incomplete submission body.
    InvalidInput(Value),
    /// 401: missing/incorrect admin credential, or none configured.
    Unauthorized(String),
    /// 429: fixed-window rate limit exceeded.
    RateLimited,
    /// 500: storage or any other unexpected failure; generic message only.
    Internal(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidInput(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": "Invalid input data", "details": details }),
            ),
            ApiError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                json!({ "success": false, "error": message }),
            ),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "success": false, "error": "Too many requests, please try again later" }),
            ),
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "success": false, "error": message }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(err) => {
                warn!(error = %err, "contact validation failed");
                ApiError::InvalidInput(serde_json::to_value(err.issues()).unwrap_or(Value::Null))
            }
            SubmitError::Storage(err) => {
                error!(error = %err, "contact submission storage failed");
                ApiError::Internal("Failed to submit contact form")
            }
        }
    }
}
