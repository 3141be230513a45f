//! Application error type mapping to HTTP status codes and envelope format.

use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use solaudit_types::error::AuditError;

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// A trigger was rejected or failed.
    Audit(AuditError),
    SessionNotFound(String),
    /// Malformed request (e.g. a session id that is not a UUID).
    Validation(String),
}

impl From<AuditError> for AppError {
    fn from(e: AuditError) -> Self {
        AppError::Audit(e)
    }
}

impl AppError {
    fn code_and_message(&self) -> (&'static str, String) {
        match self {
            AppError::Audit(e) => (e.code(), e.to_string()),
            AppError::SessionNotFound(id) => {
                ("SESSION_NOT_FOUND", format!("Session '{id}' not found"))
            }
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = self.code_and_message();

        match &self {
            AppError::Audit(e) if !e.is_warning() => {
                tracing::warn!(code, error = %message, "request failed");
            }
            _ => tracing::debug!(code, error = %message, "request rejected"),
        }

        ApiResponse::error(code, &message, Uuid::now_v7().to_string()).into_response()
    }
}
