//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, ValidationError};

/// Message sent for every server-side failure; details only go to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// API-level error type that maps to HTTP responses.
///
/// Every error renders as `{"message": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request the domain never saw (e.g. unparseable JSON).
    BadRequest(String),
    /// Business-rule violation.
    Validation(ValidationError),
    /// Domain operation failure.
    Domain(DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err.message().to_string()),
            ApiError::Domain(err) => domain_error_to_response(err),
        };

        let body = serde_json::json!({ "message": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    match err {
        DomainError::Validation(validation) => {
            (StatusCode::BAD_REQUEST, validation.message().to_string())
        }
        DomainError::Store(_) | DomainError::BookService(_) => internal(err.to_string()),
    }
}

fn internal(detail: String) -> (StatusCode, String) {
    tracing::error!(error = %detail, "internal server error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR_MESSAGE.to_string(),
    )
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => f.write_str(msg),
            ApiError::Validation(err) => write!(f, "{err}"),
            ApiError::Domain(err) => write!(f, "{err}"),
        }
    }
}
