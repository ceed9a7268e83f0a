//! Practice Error Types
//!
//! This module provides practice-session-specific error variants that
//! integrate with the unified `kernel::error::AppError` system.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Practice-specific result type alias
pub type PracticeResult<T> = Result<T, PracticeError>;

/// Practice-specific error variants
///
/// Client errors reject before any store write; store failures surface as
/// retryable server errors and are never partially applied.
#[derive(Debug, Error)]
pub enum PracticeError {
    /// Session identifier does not resolve to a stored session
    #[error("Practice session not found")]
    SessionNotFound,

    /// Request body does not match any of the supported operation shapes
    #[error("Invalid operation payload: {0}")]
    InvalidPayload(String),

    /// Mutation attempted against a completed session
    #[error("Practice session is already completed")]
    SessionCompleted,

    /// Operation names a question outside the session's exam
    #[error("Question {0} does not belong to this session")]
    UnknownQuestion(String),

    /// Stored state failed a post-validation check; fail closed
    #[error("Session invariant violated: {0}")]
    InvariantViolation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PracticeError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PracticeError::SessionNotFound => StatusCode::NOT_FOUND,
            PracticeError::InvalidPayload(_)
            | PracticeError::SessionCompleted
            | PracticeError::UnknownQuestion(_) => StatusCode::BAD_REQUEST,
            PracticeError::InvariantViolation(_)
            | PracticeError::Database(_)
            | PracticeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PracticeError::SessionNotFound => ErrorKind::NotFound,
            PracticeError::InvalidPayload(_)
            | PracticeError::SessionCompleted
            | PracticeError::UnknownQuestion(_) => ErrorKind::BadRequest,
            PracticeError::InvariantViolation(_)
            | PracticeError::Database(_)
            | PracticeError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable machine-readable wire code
    ///
    /// Completed-session and unknown-question rejections are
    /// InvalidPayload-class on the wire; the enum keeps them distinct for
    /// logging and tests.
    pub fn code(&self) -> &'static str {
        match self {
            PracticeError::SessionNotFound => "SESSION_NOT_FOUND",
            PracticeError::InvalidPayload(_)
            | PracticeError::SessionCompleted
            | PracticeError::UnknownQuestion(_) => "INVALID_PAYLOAD",
            PracticeError::InvariantViolation(_)
            | PracticeError::Database(_)
            | PracticeError::Internal(_) => "PRACTICE_SESSION_UPDATE_FAILED",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PracticeError::Database(e) => {
                tracing::error!(error = %e, "Practice database error");
            }
            PracticeError::InvariantViolation(msg) => {
                tracing::error!(message = %msg, "Practice invariant violation");
            }
            PracticeError::Internal(msg) => {
                tracing::error!(message = %msg, "Practice internal error");
            }
            PracticeError::SessionCompleted => {
                tracing::warn!("Mutation rejected on completed session");
            }
            _ => {
                tracing::debug!(error = %self, "Practice error");
            }
        }
    }
}

impl From<PracticeError> for AppError {
    fn from(err: PracticeError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for PracticeError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.code(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
