use serde::Serialize;
use uuid::Uuid;

use super::analysis_result::AnalysisResult;
use super::candidate::Candidate;
use super::error::AnalysisError;

/// Where the user currently is in the upload, analyze, review cycle.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum WorkflowState {
    #[default]
    Idle,
    FileSelected {
        candidate: Candidate,
    },
    Submitting {
        submission_id: Uuid,
        candidate: Candidate,
    },
    Succeeded {
        result: AnalysisResult,
    },
    /// Rendered as `FileSelected` with the error attached; the candidate is
    /// kept so the user can retry without selecting the file again.
    Failed {
        candidate: Option<Candidate>,
        error: AnalysisError,
    },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::FileSelected { .. } => "file_selected",
            WorkflowState::Submitting { .. } => "submitting",
            WorkflowState::Succeeded { .. } => "succeeded",
            WorkflowState::Failed { .. } => "failed",
        }
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            WorkflowState::FileSelected { candidate }
            | WorkflowState::Submitting { candidate, .. } => Some(candidate),
            WorkflowState::Failed { candidate, .. } => candidate.as_ref(),
            WorkflowState::Idle | WorkflowState::Succeeded { .. } => None,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            WorkflowState::Succeeded { result } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            WorkflowState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowState::Submitting { .. })
    }
}
