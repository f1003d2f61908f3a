//! Persistence bridge: three string-keyed values that survive a restart.
//!
//! The keys mirror the browser build's local storage: `apiKey`, `resume`, and
//! `jobDescriptions` (a JSON-serialized array). Backends are pluggable behind
//! `StateStore`; `AppState` carries an `Arc<dyn StateStore>` chosen at startup.

use async_trait::async_trait;
use thiserror::Error;

use crate::workspace::models::{JobDescription, PersistedState};

pub mod file;
pub mod redis_store;

pub use file::FileStore;
pub use redis_store::RedisStore;

pub const API_KEY_KEY: &str = "apiKey";
pub const RESUME_KEY: &str = "resume";
pub const JOB_DESCRIPTIONS_KEY: &str = "jobDescriptions";

pub const ALL_KEYS: [&str; 3] = [API_KEY_KEY, RESUME_KEY, JOB_DESCRIPTIONS_KEY];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

#[async_trait]
pub trait StateStore: Send + Sync {
    async fn load(&self) -> Result<PersistedState, StoreError>;

    async fn save(&self, state: &PersistedState) -> Result<(), StoreError>;

    /// Removes every persisted value.
    async fn clear(&self) -> Result<(), StoreError>;

    fn backend(&self) -> &'static str;
}

/// Flattens the persisted state into its three string entries.
pub fn to_entries(state: &PersistedState) -> Result<[(&'static str, String); 3], StoreError> {
    Ok([
        (API_KEY_KEY, state.api_key.clone()),
        (RESUME_KEY, state.resume.clone()),
        (
            JOB_DESCRIPTIONS_KEY,
            serde_json::to_string(&state.job_descriptions)?,
        ),
    ])
}

/// Rebuilds the persisted state from raw entries. Missing or empty values fall
/// back to their defaults, the same way an unset local-storage key does.
pub fn from_entries(
    api_key: Option<String>,
    resume: Option<String>,
    job_descriptions: Option<String>,
) -> Result<PersistedState, StoreError> {
    let job_descriptions = match job_descriptions.filter(|raw| !raw.is_empty()) {
        Some(raw) => serde_json::from_str::<Vec<JobDescription>>(&raw)?,
        None => Vec::new(),
    };

    Ok(PersistedState {
        api_key: api_key.unwrap_or_default(),
        resume: resume.unwrap_or_default(),
        job_descriptions,
    })
}
