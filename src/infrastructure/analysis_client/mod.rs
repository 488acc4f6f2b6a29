pub mod http;

use crate::domain::analysis_result::AnalysisResult;
use crate::domain::candidate::Candidate;
use crate::domain::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub use http::HttpAnalysisClient;

/// One request per call: no retries, no caching. Resolves with a response,
/// a transport failure, or `AnalysisError::Timeout` once `timeout` elapses.
#[async_trait]
pub trait AnalysisClient {
    async fn submit(&self, candidate: &Candidate, timeout: Duration) -> Result<AnalysisResult>;
}
