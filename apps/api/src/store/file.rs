use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::store::{from_entries, to_entries, StateStore, StoreError};
use crate::store::{API_KEY_KEY, JOB_DESCRIPTIONS_KEY, RESUME_KEY};
use crate::workspace::models::PersistedState;

/// Stores the three entries as one flat JSON object of strings.
/// Writes go to a sibling temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No state file at {}, starting empty", self.path.display());
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl StateStore for FileStore {
    async fn load(&self) -> Result<PersistedState, StoreError> {
        let mut entries = self.read_entries().await?;
        from_entries(
            entries.remove(API_KEY_KEY),
            entries.remove(RESUME_KEY),
            entries.remove(JOB_DESCRIPTIONS_KEY),
        )
    }

    async fn save(&self, state: &PersistedState) -> Result<(), StoreError> {
        let entries: BTreeMap<&str, String> = to_entries(state)?.into_iter().collect();
        let body = serde_json::to_string_pretty(&entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let temp = self.temp_path();
        tokio::fs::write(&temp, body).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        debug!("State saved to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
