//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use inkpress_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// An [`AppError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self(AppError::validation(errors.to_string()))
    }
}

/// Status and machine-readable code for an error kind.
pub fn status_of(kind: &ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::InvalidName => (StatusCode::BAD_REQUEST, "INVALID_NAME"),
        ErrorKind::InvalidPath => (StatusCode::BAD_REQUEST, "INVALID_PATH"),
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::PathNotFound => (StatusCode::NOT_FOUND, "PATH_NOT_FOUND"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::NameConflict { .. } => (StatusCode::CONFLICT, "NAME_CONFLICT"),
        ErrorKind::Cycle => (StatusCode::CONFLICT, "CYCLE"),
        ErrorKind::WriteConflict => (StatusCode::CONFLICT, "WRITE_CONFLICT"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::InvalidReference => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_REFERENCE"),
        ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::ExternalService
        | ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = status_of(&err.kind);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(kind = ?err.kind, error = %err, "Internal server error");
        }

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: if status == StatusCode::INTERNAL_SERVER_ERROR {
                "Internal server error".to_string()
            } else {
                err.message.clone()
            },
            details: err
                .conflict_occupant()
                .map(|occupant| serde_json::json!({ "occupant": occupant })),
        };

        (status, Json(body)).into_response()
    }
}
