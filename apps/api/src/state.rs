use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::AppError;
use crate::store::StateStore;
use crate::tailoring::service::ResumeTailor;
use crate::workspace::transitions::{Action, Workspace};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub workspace: Arc<RwLock<Workspace>>,
    /// Persistence adapter. Default: FileStore; RedisStore when REDIS_URL is set.
    pub store: Arc<dyn StateStore>,
    /// Completion backend. Default: LlmClient.
    pub tailor: Arc<dyn ResumeTailor>,
}

impl AppState {
    /// Applies one action and persists the result if a persisted field changed.
    ///
    /// The write lock is held through the save so stored snapshots follow the
    /// order of the transitions.
    pub async fn dispatch(&self, action: Action) -> Result<Workspace, AppError> {
        let clears_store = matches!(action, Action::ClearAll);

        let mut workspace = self.workspace.write().await;
        let before = workspace.persisted();
        let next = workspace.clone().apply(action)?;

        if clears_store {
            self.store.clear().await?;
        } else if next.persisted() != before {
            self.store.save(&next.persisted()).await?;
            debug!("Persisted workspace via {} store", self.store.backend());
        }

        *workspace = next.clone();
        Ok(next)
    }
}
