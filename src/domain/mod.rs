pub mod analysis_result;
pub mod candidate;
pub mod error;
pub mod workflow_state;

pub use analysis_result::{AnalysisResult, Finding, Metrics};
pub use candidate::{Candidate, DatasetKind, FileInput};
pub use error::{AnalysisError, Result};
pub use workflow_state::WorkflowState;
