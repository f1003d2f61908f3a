//! Axum route handlers for the workspace: résumé, job descriptions, selection,
//! and settings.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;
use crate::workspace::models::JobDescription;
use crate::workspace::transitions::{Action, Workspace};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResumeRequest {
    pub resume: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiKeyRequest {
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct JobDescriptionRequest {
    pub company_name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub index: Option<usize>,
}

/// Everything a client needs to draw the workspace. The API key itself is
/// never sent back, only whether one is stored.
#[derive(Debug, Serialize)]
pub struct WorkspaceView {
    pub resume: String,
    pub job_descriptions: Vec<JobDescription>,
    pub selected_index: Option<usize>,
    pub has_api_key: bool,
    pub is_loading: bool,
    pub tailored_text: String,
}

impl From<&Workspace> for WorkspaceView {
    fn from(workspace: &Workspace) -> Self {
        Self {
            resume: workspace.resume.clone(),
            job_descriptions: workspace.job_descriptions.clone(),
            selected_index: workspace.selected_index,
            has_api_key: !workspace.api_key.is_empty(),
            is_loading: workspace.is_loading(),
            tailored_text: workspace.tailored_text.clone(),
        }
    }
}

async fn apply(state: &AppState, action: Action) -> Result<Json<WorkspaceView>, AppError> {
    let workspace = state.dispatch(action).await?;
    Ok(Json(WorkspaceView::from(&workspace)))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/workspace
pub async fn handle_get_workspace(State(state): State<AppState>) -> Json<WorkspaceView> {
    let workspace = state.workspace.read().await;
    Json(WorkspaceView::from(&*workspace))
}

/// PUT /api/v1/resume
pub async fn handle_set_resume(
    State(state): State<AppState>,
    AppJson(request): AppJson<ResumeRequest>,
) -> Result<Json<WorkspaceView>, AppError> {
    apply(&state, Action::SetResume(request.resume)).await
}

/// PUT /api/v1/settings/api-key
pub async fn handle_set_api_key(
    State(state): State<AppState>,
    AppJson(request): AppJson<ApiKeyRequest>,
) -> Result<Json<WorkspaceView>, AppError> {
    apply(&state, Action::SetApiKey(request.api_key)).await
}

/// DELETE /api/v1/settings/data
///
/// Wipes the API key, résumé, job descriptions and any tailored output.
pub async fn handle_delete_all_data(
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.dispatch(Action::ClearAll).await?;
    tracing::info!("All workspace data deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/job-descriptions
pub async fn handle_add_job_description(
    State(state): State<AppState>,
    AppJson(request): AppJson<JobDescriptionRequest>,
) -> Result<(StatusCode, Json<WorkspaceView>), AppError> {
    let view = apply(
        &state,
        Action::AddJobDescription {
            company_name: request.company_name,
            description: request.description,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, view))
}

/// PUT /api/v1/job-descriptions/:index
pub async fn handle_edit_job_description(
    State(state): State<AppState>,
    AppPath(index): AppPath<usize>,
    AppJson(request): AppJson<JobDescriptionRequest>,
) -> Result<Json<WorkspaceView>, AppError> {
    apply(
        &state,
        Action::EditJobDescription {
            index,
            company_name: request.company_name,
            description: request.description,
        },
    )
    .await
}

/// DELETE /api/v1/job-descriptions/:index
pub async fn handle_delete_job_description(
    State(state): State<AppState>,
    AppPath(index): AppPath<usize>,
) -> Result<Json<WorkspaceView>, AppError> {
    apply(&state, Action::DeleteJobDescription(index)).await
}

/// PUT /api/v1/selection
pub async fn handle_select_job_description(
    State(state): State<AppState>,
    AppJson(request): AppJson<SelectionRequest>,
) -> Result<Json<WorkspaceView>, AppError> {
    apply(&state, Action::Select(request.index)).await
}
