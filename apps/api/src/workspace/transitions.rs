//! Workspace state and its pure transition function.
//!
//! Every user action is an `Action` applied to an owned `Workspace`, producing
//! the next `Workspace`. Side effects (persistence, the completion call) live
//! in `AppState` and the tailoring service, never here.

use thiserror::Error;

use crate::workspace::models::{JobDescription, PersistedState};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("An API key is required before tailoring")]
    MissingApiKey,

    #[error("Please add your resume")]
    MissingResume,

    #[error("Please select a job description")]
    NoJobDescriptionSelected,

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("No job description at index {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("All data was deleted while the resume was being tailored")]
    ClearedDuringTailoring,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetResume(String),
    SetApiKey(String),
    AddJobDescription {
        company_name: String,
        description: String,
    },
    EditJobDescription {
        index: usize,
        company_name: String,
        description: String,
    },
    DeleteJobDescription(usize),
    Select(Option<usize>),
    ClearAll,
}

/// Inputs captured when a tailoring request starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub resume: String,
    pub company_name: String,
    pub job_description: String,
    pub api_key: String,
    /// Workspace generation the request was started in.
    pub generation: u64,
}

/// The whole application state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    pub resume: String,
    pub job_descriptions: Vec<JobDescription>,
    pub selected_index: Option<usize>,
    pub tailored_text: String,
    pub api_key: String,
    /// Completion requests currently in flight. Nothing stops a second submit.
    pub pending_requests: u32,
    /// Bumped by `ClearAll`. Results of requests started in an older
    /// generation are dropped.
    pub generation: u64,
}

impl Workspace {
    pub fn from_persisted(persisted: PersistedState) -> Self {
        Self {
            resume: persisted.resume,
            job_descriptions: persisted.job_descriptions,
            api_key: persisted.api_key,
            ..Self::default()
        }
    }

    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            api_key: self.api_key.clone(),
            resume: self.resume.clone(),
            job_descriptions: self.job_descriptions.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_requests > 0
    }

    pub fn selected(&self) -> Option<&JobDescription> {
        self.selected_index
            .and_then(|index| self.job_descriptions.get(index))
    }

    pub fn apply(mut self, action: Action) -> Result<Self, WorkspaceError> {
        match action {
            Action::SetResume(text) => {
                self.resume = text.trim().to_string();
            }
            Action::SetApiKey(key) => {
                self.api_key = key.trim().to_string();
            }
            Action::AddJobDescription {
                company_name,
                description,
            } => {
                let (company_name, description) = validate_fields(&company_name, &description)?;
                self.job_descriptions
                    .push(JobDescription::new(company_name, description));
            }
            Action::EditJobDescription {
                index,
                company_name,
                description,
            } => {
                let (company_name, description) = validate_fields(&company_name, &description)?;
                let len = self.job_descriptions.len();
                let entry = self
                    .job_descriptions
                    .get_mut(index)
                    .ok_or(WorkspaceError::IndexOutOfRange { index, len })?;
                entry.company_name = company_name;
                entry.description = description;
            }
            Action::DeleteJobDescription(index) => {
                let len = self.job_descriptions.len();
                if index >= len {
                    return Err(WorkspaceError::IndexOutOfRange { index, len });
                }
                self.job_descriptions.remove(index);
                self.selected_index = match self.selected_index {
                    Some(selected) if selected == index => None,
                    Some(selected) if selected > index => Some(selected - 1),
                    other => other,
                };
            }
            Action::Select(selection) => {
                if let Some(index) = selection {
                    let len = self.job_descriptions.len();
                    if index >= len {
                        return Err(WorkspaceError::IndexOutOfRange { index, len });
                    }
                }
                self.selected_index = selection;
            }
            Action::ClearAll => {
                // In-flight requests still count toward loading until they finish.
                self = Self {
                    pending_requests: self.pending_requests,
                    generation: self.generation.wrapping_add(1),
                    ..Self::default()
                };
            }
        }
        Ok(self)
    }

    /// Checks the submit preconditions in order (API key, resume, selection)
    /// and marks a request as in flight.
    pub fn begin_tailoring(&mut self) -> Result<Submission, WorkspaceError> {
        if self.api_key.is_empty() {
            return Err(WorkspaceError::MissingApiKey);
        }
        if self.resume.is_empty() {
            return Err(WorkspaceError::MissingResume);
        }
        let selected = self
            .selected()
            .ok_or(WorkspaceError::NoJobDescriptionSelected)?;

        let submission = Submission {
            resume: self.resume.clone(),
            company_name: selected.company_name.clone(),
            job_description: selected.description.clone(),
            api_key: self.api_key.clone(),
            generation: self.generation,
        };
        self.pending_requests += 1;
        Ok(submission)
    }

    /// Ends an in-flight request. A successful result replaces the tailored
    /// text wholesale; a failure leaves the previous text in place. A result
    /// from before the last `ClearAll` is discarded. Returns whether the text
    /// was stored.
    pub fn finish_tailoring(&mut self, generation: u64, result: Option<String>) -> bool {
        self.pending_requests = self.pending_requests.saturating_sub(1);
        match result {
            Some(text) if generation == self.generation => {
                self.tailored_text = text;
                true
            }
            _ => false,
        }
    }
}

fn validate_fields(
    company_name: &str,
    description: &str,
) -> Result<(String, String), WorkspaceError> {
    let company_name = company_name.trim();
    let description = description.trim();
    if company_name.is_empty() {
        return Err(WorkspaceError::EmptyField("company_name"));
    }
    if description.is_empty() {
        return Err(WorkspaceError::EmptyField("description"));
    }
    Ok((company_name.to_string(), description.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_jds(names: &[&str]) -> Workspace {
        names.iter().fold(Workspace::default(), |ws, name| {
            ws.apply(Action::AddJobDescription {
                company_name: name.to_string(),
                description: format!("{name} is hiring"),
            })
            .unwrap()
        })
    }

    fn ready_to_submit() -> Workspace {
        with_jds(&["Acme"])
            .apply(Action::SetApiKey("sk-test".to_string()))
            .unwrap()
            .apply(Action::SetResume("Rust engineer".to_string()))
            .unwrap()
            .apply(Action::Select(Some(0)))
            .unwrap()
    }

    #[test]
    fn test_add_appends_in_insertion_order_and_trims() {
        let ws = Workspace::default()
            .apply(Action::AddJobDescription {
                company_name: "  Acme  ".to_string(),
                description: " Backend role \n".to_string(),
            })
            .unwrap()
            .apply(Action::AddJobDescription {
                company_name: "Globex".to_string(),
                description: "Platform role".to_string(),
            })
            .unwrap();

        assert_eq!(ws.job_descriptions.len(), 2);
        assert_eq!(ws.job_descriptions[0].company_name, "Acme");
        assert_eq!(ws.job_descriptions[0].description, "Backend role");
        assert_eq!(ws.job_descriptions[1].company_name, "Globex");
    }

    #[test]
    fn test_add_rejects_blank_fields() {
        let err = Workspace::default()
            .apply(Action::AddJobDescription {
                company_name: "   ".to_string(),
                description: "desc".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, WorkspaceError::EmptyField("company_name"));

        let err = Workspace::default()
            .apply(Action::AddJobDescription {
                company_name: "Acme".to_string(),
                description: "\n".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, WorkspaceError::EmptyField("description"));
    }

    #[test]
    fn test_edit_preserves_id_and_position() {
        let ws = with_jds(&["Acme", "Globex"]);
        let original_id = ws.job_descriptions[1].id.clone();

        let ws = ws
            .apply(Action::EditJobDescription {
                index: 1,
                company_name: "Globex Corp".to_string(),
                description: "Updated".to_string(),
            })
            .unwrap();

        assert_eq!(ws.job_descriptions[1].id, original_id);
        assert_eq!(ws.job_descriptions[1].company_name, "Globex Corp");
        assert_eq!(ws.job_descriptions[1].description, "Updated");
        assert_eq!(ws.job_descriptions[0].company_name, "Acme");
    }

    #[test]
    fn test_edit_out_of_range() {
        let err = with_jds(&["Acme"])
            .apply(Action::EditJobDescription {
                index: 3,
                company_name: "x".to_string(),
                description: "y".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, WorkspaceError::IndexOutOfRange { index: 3, len: 1 });
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let ws = with_jds(&["A", "B", "C"])
            .apply(Action::Select(Some(1)))
            .unwrap()
            .apply(Action::DeleteJobDescription(1))
            .unwrap();
        assert_eq!(ws.selected_index, None);
        assert_eq!(ws.job_descriptions.len(), 2);
    }

    #[test]
    fn test_delete_before_selection_shifts_it_down() {
        let ws = with_jds(&["A", "B", "C"])
            .apply(Action::Select(Some(2)))
            .unwrap()
            .apply(Action::DeleteJobDescription(0))
            .unwrap();
        assert_eq!(ws.selected_index, Some(1));
        assert_eq!(ws.selected().unwrap().company_name, "C");
    }

    #[test]
    fn test_delete_after_selection_leaves_it() {
        let ws = with_jds(&["A", "B", "C"])
            .apply(Action::Select(Some(0)))
            .unwrap()
            .apply(Action::DeleteJobDescription(2))
            .unwrap();
        assert_eq!(ws.selected_index, Some(0));
        assert_eq!(ws.selected().unwrap().company_name, "A");
    }

    #[test]
    fn test_delete_without_selection_keeps_none() {
        let ws = with_jds(&["A", "B"])
            .apply(Action::DeleteJobDescription(0))
            .unwrap();
        assert_eq!(ws.selected_index, None);
    }

    #[test]
    fn test_select_rejects_out_of_range() {
        let err = with_jds(&["A"]).apply(Action::Select(Some(1))).unwrap_err();
        assert_eq!(err, WorkspaceError::IndexOutOfRange { index: 1, len: 1 });
    }

    #[test]
    fn test_select_none_deselects() {
        let ws = with_jds(&["A"])
            .apply(Action::Select(Some(0)))
            .unwrap()
            .apply(Action::Select(None))
            .unwrap();
        assert!(ws.selected().is_none());
    }

    #[test]
    fn test_set_resume_trims() {
        let ws = Workspace::default()
            .apply(Action::SetResume("\n  My resume  \n".to_string()))
            .unwrap();
        assert_eq!(ws.resume, "My resume");
    }

    #[test]
    fn test_begin_tailoring_checks_api_key_first() {
        let mut ws = Workspace::default();
        assert_eq!(ws.begin_tailoring(), Err(WorkspaceError::MissingApiKey));
        assert!(!ws.is_loading());
    }

    #[test]
    fn test_begin_tailoring_checks_resume_second() {
        let mut ws = with_jds(&["A"])
            .apply(Action::SetApiKey("k".to_string()))
            .unwrap()
            .apply(Action::Select(Some(0)))
            .unwrap();
        assert_eq!(ws.begin_tailoring(), Err(WorkspaceError::MissingResume));
    }

    #[test]
    fn test_begin_tailoring_requires_selection_even_with_jds() {
        let mut ws = with_jds(&["A", "B"])
            .apply(Action::SetApiKey("k".to_string()))
            .unwrap()
            .apply(Action::SetResume("resume".to_string()))
            .unwrap();
        assert_eq!(
            ws.begin_tailoring(),
            Err(WorkspaceError::NoJobDescriptionSelected)
        );
        assert_eq!(ws.pending_requests, 0);
    }

    #[test]
    fn test_tailoring_round_trip_updates_loading_and_text() {
        let mut ws = ready_to_submit();
        let submission = ws.begin_tailoring().unwrap();
        assert_eq!(submission.job_description, "Acme is hiring");
        assert_eq!(submission.company_name, "Acme");
        assert!(ws.is_loading());

        assert!(ws.finish_tailoring(submission.generation, Some("new text".to_string())));
        assert!(!ws.is_loading());
        assert_eq!(ws.tailored_text, "new text");
    }

    #[test]
    fn test_failed_tailoring_keeps_previous_text() {
        let mut ws = ready_to_submit();
        ws.tailored_text = "old".to_string();
        let submission = ws.begin_tailoring().unwrap();
        assert!(!ws.finish_tailoring(submission.generation, None));
        assert_eq!(ws.tailored_text, "old");
        assert!(!ws.is_loading());
    }

    #[test]
    fn test_concurrent_submissions_stay_loading_until_both_finish() {
        let mut ws = ready_to_submit();
        let first = ws.begin_tailoring().unwrap();
        let second = ws.begin_tailoring().unwrap();
        ws.finish_tailoring(first.generation, Some("first".to_string()));
        assert!(ws.is_loading());
        ws.finish_tailoring(second.generation, Some("second".to_string()));
        assert!(!ws.is_loading());
        assert_eq!(ws.tailored_text, "second");
    }

    #[test]
    fn test_clear_all_resets_everything() {
        let mut ws = ready_to_submit();
        ws.tailored_text = "text".to_string();
        let ws = ws.apply(Action::ClearAll).unwrap();
        assert_eq!(
            ws,
            Workspace {
                generation: 1,
                ..Workspace::default()
            }
        );
    }

    #[test]
    fn test_clear_all_discards_result_of_request_in_flight() {
        let mut ws = ready_to_submit();
        let submission = ws.begin_tailoring().unwrap();

        let mut ws = ws.apply(Action::ClearAll).unwrap();
        assert!(ws.is_loading());

        let stored = ws.finish_tailoring(submission.generation, Some("stale".to_string()));
        assert!(!stored);
        assert!(!ws.is_loading());
        assert_eq!(ws.tailored_text, "");
        assert_eq!(ws.persisted(), PersistedState::default());
    }

    #[test]
    fn test_persisted_projection_round_trips() {
        let ws = ready_to_submit();
        let restored = Workspace::from_persisted(ws.persisted());
        assert_eq!(restored.resume, ws.resume);
        assert_eq!(restored.api_key, ws.api_key);
        assert_eq!(restored.job_descriptions, ws.job_descriptions);
        assert_eq!(restored.selected_index, None);
    }
}
