use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved job description. Field names are camelCase so the persisted JSON
/// array keeps the same shape the browser build wrote to local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescription {
    pub id: String,
    pub company_name: String,
    pub description: String,
}

impl JobDescription {
    /// Creates an entry with a freshly generated id.
    pub fn new(company_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_name: company_name.into(),
            description: description.into(),
        }
    }
}

/// The subset of the workspace that survives a restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub api_key: String,
    pub resume: String,
    pub job_descriptions: Vec<JobDescription>,
}
