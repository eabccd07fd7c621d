//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use userhub_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Status code for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidParameter => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::TokenExpired | ErrorKind::TokenInvalid | ErrorKind::InvalidToken => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Database
        | ErrorKind::Serialization
        | ErrorKind::Configuration
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<&AppError> for ApiErrorResponse {
    fn from(err: &AppError) -> Self {
        if err.kind.is_internal() {
            Self {
                error: "INTERNAL_ERROR".to_string(),
                message: "An internal error occurred".to_string(),
            }
        } else {
            Self {
                error: err.kind.code().to_string(),
                message: err.message.clone(),
            }
        }
    }
}

pub(crate) fn error_response(err: AppError) -> Response {
    let status = status_for(err.kind);
    if err.kind.is_internal() {
        tracing::error!(kind = %err.kind, error = %err, "Internal server error");
    } else if err.kind == ErrorKind::ServiceUnavailable {
        tracing::warn!(error = %err.message, "Dependency unavailable");
    }

    (status, Json(ApiErrorResponse::from(&err))).into_response()
}

/// Response wrapper so handlers can return `Result<_, ApiError>`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error_response(self.0)
    }
}
