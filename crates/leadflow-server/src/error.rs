//! HTTP error types for the Leadflow server.
//!
//! Maps errors from the view engine, the record stores, and the workflow
//! client into HTTP responses. Every variant produces a JSON body with a
//! machine-readable `error` field and a human-readable `message`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use leadflow_core::error::ViewError;
use leadflow_storage::StorageError;
use leadflow_workflows::WorkflowError;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Requested resource not found.
    NotFound(String),
    /// Client sent invalid input.
    BadRequest(String),
    /// The request conflicts with current state or an in-flight submission.
    Conflict(String),
    /// The automation backend did not confirm the submission.
    BadGateway(String),
    /// Internal server error.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "submission_failed", msg),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_owned(),
                )
            }
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ViewError> for AppError {
    fn from(err: ViewError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        if !err.is_local() {
            tracing::warn!(error = %err, "workflow submission failed");
            return Self::BadGateway(err.user_message());
        }
        match err {
            WorkflowError::Invalid(msg) => Self::BadRequest(msg),
            WorkflowError::InFlight(_) => Self::Conflict(err.user_message()),
            other => Self::Internal(other.to_string()),
        }
    }
}
