//! Submit flow: precondition checks, the completion call, and the result.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::llm_client::{ChatMessage, LlmClient, LlmError};
use crate::state::AppState;
use crate::tailoring::formatter::{format_tailored, FormattedResume};
use crate::tailoring::prompts::{build_user_prompt, TAILOR_SYSTEM};
use crate::workspace::transitions::WorkspaceError;

/// Produces tailored résumé text from a résumé and one job description.
///
/// `AppState` holds an `Arc<dyn ResumeTailor>`; `LlmClient` is the production
/// implementation.
#[async_trait]
pub trait ResumeTailor: Send + Sync {
    async fn tailor(
        &self,
        resume: &str,
        job_description: &str,
        api_key: &str,
    ) -> Result<String, LlmError>;
}

#[async_trait]
impl ResumeTailor for LlmClient {
    async fn tailor(
        &self,
        resume: &str,
        job_description: &str,
        api_key: &str,
    ) -> Result<String, LlmError> {
        let messages = [
            ChatMessage::system(TAILOR_SYSTEM),
            ChatMessage::user(build_user_prompt(resume, job_description)),
        ];
        self.complete(api_key, &messages).await
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TailorOutcome {
    pub company_name: String,
    pub tailored_text: String,
    pub generated_at: DateTime<Utc>,
    /// `None` when the text does not follow the seven-section layout.
    pub formatted: Option<FormattedResume>,
    pub format_error: Option<String>,
}

/// Runs one tailoring request for the selected job description.
///
/// Preconditions are checked under the workspace lock; the lock is released
/// for the completion call. Concurrent submits are not serialized, so the
/// last one to finish owns `tailored_text`.
pub async fn tailor_selected(state: &AppState) -> Result<TailorOutcome, AppError> {
    let submission = {
        let mut workspace = state.workspace.write().await;
        workspace.begin_tailoring()?
    };

    info!(
        "Tailoring resume for {} ({} resume chars, {} JD chars)",
        submission.company_name,
        submission.resume.chars().count(),
        submission.job_description.chars().count()
    );

    let result = state
        .tailor
        .tailor(
            &submission.resume,
            &submission.job_description,
            &submission.api_key,
        )
        .await;

    let mut workspace = state.workspace.write().await;
    match result {
        Ok(text) => {
            let stored = workspace.finish_tailoring(submission.generation, Some(text.clone()));
            drop(workspace);
            if !stored {
                warn!(
                    "Discarding tailored resume for {}: workspace was cleared",
                    submission.company_name
                );
                return Err(WorkspaceError::ClearedDuringTailoring.into());
            }

            let (formatted, format_error) = match format_tailored(&text) {
                Ok(formatted) => (Some(formatted), None),
                Err(e) => (None, Some(e.to_string())),
            };
            info!("Tailored resume received for {}", submission.company_name);

            Ok(TailorOutcome {
                company_name: submission.company_name,
                tailored_text: text,
                generated_at: Utc::now(),
                formatted,
                format_error,
            })
        }
        Err(e) => {
            workspace.finish_tailoring(submission.generation, None);
            error!("Error tailoring resume: {e}");
            Err(AppError::Tailoring(e))
        }
    }
}
