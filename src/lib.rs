pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use application::{Submission, WorkflowController};
pub use domain::{
    AnalysisError, AnalysisResult, Candidate, DatasetKind, FileInput, Finding, Metrics,
    WorkflowState,
};
pub use infrastructure::analysis_client::{AnalysisClient, HttpAnalysisClient};
pub use infrastructure::config::AnalysisConfig;
