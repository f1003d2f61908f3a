//! Axum route handlers for the Tailoring API.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::tailoring::formatter::{format_tailored, FormattedResume};
use crate::tailoring::service::{tailor_selected, TailorOutcome};

pub const DOWNLOAD_FILENAME: &str = "tailored_resume.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TailoredStatus {
    Empty,
    Loading,
    Ready,
}

#[derive(Debug, Serialize)]
pub struct TailoredView {
    pub status: TailoredStatus,
    pub tailored_text: String,
    pub formatted: Option<FormattedResume>,
}

/// POST /api/v1/tailor
///
/// Tailors the saved résumé to the selected job description. Missing
/// preconditions fail fast with a distinct code and no outbound call.
pub async fn handle_tailor(
    State(state): State<AppState>,
) -> Result<Json<TailorOutcome>, AppError> {
    let outcome = tailor_selected(&state).await?;
    Ok(Json(outcome))
}

/// GET /api/v1/tailored
///
/// The current tailored résumé split into labeled sections. A loading
/// workspace reports `loading` even if older text is present.
pub async fn handle_get_tailored(
    State(state): State<AppState>,
) -> Result<Json<TailoredView>, AppError> {
    let (is_loading, text) = {
        let workspace = state.workspace.read().await;
        (workspace.is_loading(), workspace.tailored_text.clone())
    };

    if is_loading {
        return Ok(Json(TailoredView {
            status: TailoredStatus::Loading,
            tailored_text: text,
            formatted: None,
        }));
    }
    if text.is_empty() {
        return Ok(Json(TailoredView {
            status: TailoredStatus::Empty,
            tailored_text: text,
            formatted: None,
        }));
    }

    let formatted = format_tailored(&text)?;
    Ok(Json(TailoredView {
        status: TailoredStatus::Ready,
        tailored_text: text,
        formatted: Some(formatted),
    }))
}

/// GET /api/v1/tailored/text
///
/// Raw tailored text for copying to the clipboard.
pub async fn handle_tailored_text(State(state): State<AppState>) -> impl IntoResponse {
    let text = state.workspace.read().await.tailored_text.clone();
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text)
}

/// GET /api/v1/tailored/download
///
/// Raw tailored text as a file attachment.
pub async fn handle_download_tailored(State(state): State<AppState>) -> impl IntoResponse {
    let text = state.workspace.read().await.tailored_text.clone();
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        text,
    )
}
