use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AnalysisError {
    /// Rejected on the client before anything was sent.
    Validation { reason: String },
    /// No response could be obtained (DNS, refused connection, reset).
    Network { cause: String },
    /// The analysis budget elapsed before a response arrived.
    Timeout { timeout_ms: u64 },
    /// The service answered with a non-success status.
    Service {
        status_code: u16,
        detail_message: String,
    },
    /// The service answered 2xx but the body is not a usable report.
    MalformedResponse { reason: String },
    /// A local file could not be read before selection.
    Io { reason: String },
}

impl AnalysisError {
    pub fn validation(reason: impl Into<String>) -> Self {
        AnalysisError::Validation {
            reason: reason.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AnalysisError::Validation { .. })
    }

    /// Message shown next to the upload form.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Validation { reason } => match reason.as_str() {
                UNSUPPORTED_TYPE => {
                    "Unsupported file type. Please choose a .csv or .xlsx file.".to_string()
                }
                NO_FILE => "Please select a file to analyze.".to_string(),
                ANALYSIS_IN_PROGRESS => {
                    "An analysis is already running. Please wait for it to finish.".to_string()
                }
                other => format!("Invalid selection: {}", other),
            },
            AnalysisError::Network { .. } => {
                "Could not reach the analysis service. Check your connection and try again."
                    .to_string()
            }
            AnalysisError::Timeout { timeout_ms } => format!(
                "The analysis took longer than {} seconds. Please try again.",
                timeout_ms / 1000
            ),
            AnalysisError::Service { detail_message, .. } => {
                format!("The analysis failed: {}", detail_message)
            }
            AnalysisError::MalformedResponse { .. } => {
                "The analysis service returned a report that could not be read.".to_string()
            }
            AnalysisError::Io { reason } => format!("Could not read the file: {}", reason),
        }
    }
}

pub const UNSUPPORTED_TYPE: &str = "unsupported type";
pub const NO_FILE: &str = "no file";
pub const ANALYSIS_IN_PROGRESS: &str = "analysis in progress";

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Validation { reason } => write!(f, "Validation error: {}", reason),
            AnalysisError::Network { cause } => write!(f, "Network error: {}", cause),
            AnalysisError::Timeout { timeout_ms } => {
                write!(f, "Timeout error: no response within {}ms", timeout_ms)
            }
            AnalysisError::Service {
                status_code,
                detail_message,
            } => write!(f, "Service error ({}): {}", status_code, detail_message),
            AnalysisError::MalformedResponse { reason } => {
                write!(f, "Malformed response: {}", reason)
            }
            AnalysisError::Io { reason } => write!(f, "IO error: {}", reason),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::Io {
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
