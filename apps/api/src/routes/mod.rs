pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;
use crate::tailoring::handlers as tailoring;
use crate::workspace::handlers as workspace;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Workspace
        .route("/api/v1/workspace", get(workspace::handle_get_workspace))
        .route("/api/v1/resume", put(workspace::handle_set_resume))
        .route(
            "/api/v1/settings/api-key",
            put(workspace::handle_set_api_key),
        )
        .route(
            "/api/v1/settings/data",
            delete(workspace::handle_delete_all_data),
        )
        .route(
            "/api/v1/job-descriptions",
            post(workspace::handle_add_job_description),
        )
        .route(
            "/api/v1/job-descriptions/:index",
            put(workspace::handle_edit_job_description)
                .delete(workspace::handle_delete_job_description),
        )
        .route(
            "/api/v1/selection",
            put(workspace::handle_select_job_description),
        )
        // Tailoring
        .route("/api/v1/tailor", post(tailoring::handle_tailor))
        .route("/api/v1/tailored", get(tailoring::handle_get_tailored))
        .route(
            "/api/v1/tailored/text",
            get(tailoring::handle_tailored_text),
        )
        .route(
            "/api/v1/tailored/download",
            get(tailoring::handle_download_tailored),
        )
        .with_state(state)
}
