use crate::application::use_cases::file_selection;
use crate::domain::analysis_result::AnalysisResult;
use crate::domain::candidate::{Candidate, FileInput};
use crate::domain::error::{AnalysisError, Result, ANALYSIS_IN_PROGRESS, NO_FILE};
use crate::domain::workflow_state::WorkflowState;
use crate::infrastructure::analysis_client::AnalysisClient;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A submission handed to whoever performs the network call. Its id must
/// come back with the outcome in [`WorkflowController::complete`].
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: Uuid,
    pub candidate: Candidate,
}

/// Owns the single `WorkflowState` and applies user events to it.
///
/// Transitions are synchronous. The only asynchronous step is the client
/// call made by [`analyze`](Self::analyze); hosts that run the request
/// themselves use `begin_analysis` and `complete` instead.
pub struct WorkflowController {
    state: WorkflowState,
    notice: Option<AnalysisError>,
    timeout: Duration,
}

impl WorkflowController {
    pub fn new(timeout: Duration) -> Self {
        Self {
            state: WorkflowState::Idle,
            notice: None,
            timeout,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        self.state.candidate()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.state.result()
    }

    /// Error to show next to the upload form. A fresh rejection wins over
    /// the failure of an earlier submission.
    pub fn error(&self) -> Option<&AnalysisError> {
        self.notice.as_ref().or(self.state.error())
    }

    /// Transient error from the last rejected event, if any.
    pub fn notice(&self) -> Option<&AnalysisError> {
        self.notice.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Replaces any held file and drops downstream result and error.
    /// A rejected selection leaves the state untouched.
    pub fn select(&mut self, inputs: impl IntoIterator<Item = FileInput>) -> Result<Candidate> {
        if self.state.is_submitting() {
            debug!("Selection ignored while an analysis is in flight");
            return Err(AnalysisError::validation(ANALYSIS_IN_PROGRESS));
        }

        match file_selection::select(inputs) {
            Ok(candidate) => {
                info!(
                    from = self.state.name(),
                    file = %candidate.name(),
                    size = %candidate.display_size(),
                    kind = %candidate.kind(),
                    "File selected"
                );
                self.notice = None;
                self.state = WorkflowState::FileSelected {
                    candidate: candidate.clone(),
                };
                Ok(candidate)
            }
            Err(err) => {
                info!(state = self.state.name(), error = %err, "File selection rejected");
                self.notice = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Moves the held file into `Submitting`. Rejected without any state
    /// change when nothing is held or a submission is already in flight.
    pub fn begin_analysis(&mut self) -> Result<Submission> {
        let candidate = match &self.state {
            WorkflowState::Submitting { submission_id, .. } => {
                debug!(submission_id = %submission_id, "Analyze ignored, submission already in flight");
                return Err(AnalysisError::validation(ANALYSIS_IN_PROGRESS));
            }
            WorkflowState::FileSelected { candidate }
            | WorkflowState::Failed {
                candidate: Some(candidate),
                ..
            } => candidate.clone(),
            WorkflowState::Idle
            | WorkflowState::Succeeded { .. }
            | WorkflowState::Failed {
                candidate: None, ..
            } => {
                let err = AnalysisError::validation(NO_FILE);
                info!(state = self.state.name(), "Analyze requested without a file");
                self.notice = Some(err.clone());
                return Err(err);
            }
        };

        let submission = Submission {
            id: Uuid::new_v4(),
            candidate,
        };
        info!(
            submission_id = %submission.id,
            file = %submission.candidate.name(),
            "Analysis submitted"
        );
        self.notice = None;
        self.state = WorkflowState::Submitting {
            submission_id: submission.id,
            candidate: submission.candidate.clone(),
        };
        Ok(submission)
    }

    /// Applies the outcome of the in-flight submission. Returns `false` and
    /// changes nothing if `submission_id` is not the one in flight.
    pub fn complete(&mut self, submission_id: Uuid, outcome: Result<AnalysisResult>) -> bool {
        let candidate = match &self.state {
            WorkflowState::Submitting {
                submission_id: current,
                candidate,
            } if *current == submission_id => candidate.clone(),
            _ => {
                warn!(
                    submission_id = %submission_id,
                    state = self.state.name(),
                    "Ignoring completion for a submission that is not in flight"
                );
                return false;
            }
        };

        self.state = match outcome {
            Ok(result) => {
                info!(
                    submission_id = %submission_id,
                    health = result.metrics.dataset_health_pct,
                    observations = result.observations.len(),
                    suggestions = result.suggestions.len(),
                    "Analysis succeeded"
                );
                WorkflowState::Succeeded { result }
            }
            Err(error) => {
                warn!(submission_id = %submission_id, error = %error, "Analysis failed");
                WorkflowState::Failed {
                    candidate: Some(candidate),
                    error,
                }
            }
        };
        true
    }

    /// Submits the held file and waits for the outcome. Every failure is
    /// folded into the state; the returned value mirrors it for callers.
    pub async fn analyze<C>(&mut self, client: &C) -> Result<AnalysisResult>
    where
        C: AnalysisClient + ?Sized,
    {
        let submission = self.begin_analysis()?;
        let outcome = client.submit(&submission.candidate, self.timeout).await;
        self.complete(submission.id, outcome.clone());
        outcome
    }

    /// Drops candidate, result and error. Ignored while submitting.
    pub fn clear_file(&mut self) -> bool {
        if self.state.is_submitting() {
            debug!("Clear ignored while an analysis is in flight");
            return false;
        }
        info!(from = self.state.name(), "File cleared");
        self.state = WorkflowState::Idle;
        self.notice = None;
        true
    }

    /// Leaves the report view. Only meaningful after a success.
    pub fn reset(&mut self) -> bool {
        if !matches!(self.state, WorkflowState::Succeeded { .. }) {
            debug!(state = self.state.name(), "Reset ignored");
            return false;
        }
        info!("Workflow reset");
        self.state = WorkflowState::Idle;
        self.notice = None;
        true
    }
}
