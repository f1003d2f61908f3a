use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::store::StoreError;
use crate::tailoring::formatter::FormatError;
use crate::workspace::transitions::WorkspaceError;

/// User-facing message for every failed completion call, whatever the cause.
pub const TAILORING_FAILED_MESSAGE: &str =
    "Failed to tailor resume. Please check your API key and try again.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// The variant keeps the failure kind (validation, transport, parse) even where
/// the rendered message is deliberately generic.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error("Failed to tailor resume. Please check your API key and try again.")]
    Tailoring(#[source] LlmError),

    #[error("Tailored resume could not be formatted: {0}")]
    Format(#[from] FormatError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    InvalidJson(#[from] JsonRejection),

    #[error(transparent)]
    InvalidPath(#[from] PathRejection),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Workspace(WorkspaceError::MissingApiKey) => "MISSING_API_KEY",
            AppError::Workspace(WorkspaceError::MissingResume) => "MISSING_RESUME",
            AppError::Workspace(WorkspaceError::NoJobDescriptionSelected) => {
                "NO_JOB_DESCRIPTION_SELECTED"
            }
            AppError::Workspace(WorkspaceError::EmptyField(_)) => "VALIDATION_ERROR",
            AppError::Workspace(WorkspaceError::IndexOutOfRange { .. }) => "NOT_FOUND",
            AppError::Workspace(WorkspaceError::ClearedDuringTailoring) => "WORKSPACE_CLEARED",
            AppError::Tailoring(_) => "TAILORING_FAILED",
            AppError::Format(_) => "TAILORED_FORMAT_ERROR",
            AppError::Store(_) => "STORE_ERROR",
            AppError::InvalidJson(_) | AppError::InvalidPath(_) => "INVALID_REQUEST",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match &self {
            AppError::Workspace(WorkspaceError::IndexOutOfRange { .. }) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::Workspace(WorkspaceError::ClearedDuringTailoring) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            AppError::Workspace(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Tailoring(e) => {
                tracing::error!("Tailoring error: {e}");
                (StatusCode::BAD_GATEWAY, TAILORING_FAILED_MESSAGE.to_string())
            }
            AppError::Format(e) => {
                tracing::warn!("Format error: {e}");
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Saved data could not be read or written".to_string(),
                )
            }
            AppError::InvalidJson(rejection) => (rejection.status(), rejection.body_text()),
            AppError::InvalidPath(rejection) => (rejection.status(), rejection.body_text()),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
