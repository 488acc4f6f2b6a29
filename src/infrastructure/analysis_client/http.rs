use super::AnalysisClient;
use crate::domain::analysis_result::AnalysisResult;
use crate::domain::candidate::Candidate;
use crate::domain::error::{AnalysisError, Result};
use crate::infrastructure::config::AnalysisConfig;
use crate::infrastructure::response::{decode_analysis_result, service_error};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Multipart field the analysis service reads the upload from.
pub const FILE_FIELD: &str = "file";

pub struct HttpAnalysisClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnalysisClient {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn exchange(&self, candidate: &Candidate, timeout_ms: u64) -> Result<AnalysisResult> {
        let length = candidate.content().len() as u64;
        let part = Part::stream_with_length(candidate.content_bytes(), length)
            .file_name(candidate.name().to_string())
            .mime_str(candidate.mime_type())
            .map_err(|_| AnalysisError::validation("invalid content type"))?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error(e, timeout_ms))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, timeout_ms))?;

        if !status.is_success() {
            return Err(service_error(status.as_u16(), &body));
        }

        decode_analysis_result(&body)
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn submit(&self, candidate: &Candidate, timeout: Duration) -> Result<AnalysisResult> {
        let timeout_ms = timeout.as_millis() as u64;
        let start = Instant::now();
        debug!(
            endpoint = %self.endpoint,
            file = %candidate.name(),
            size_bytes = candidate.size_bytes(),
            timeout_ms,
            "Submitting dataset for analysis"
        );

        let outcome = match tokio::time::timeout(timeout, self.exchange(candidate, timeout_ms)).await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(AnalysisError::Timeout { timeout_ms }),
        };

        let latency_ms = start.elapsed().as_millis() as u64;
        match &outcome {
            Ok(result) => info!(
                latency_ms,
                observations = result.observations.len(),
                suggestions = result.suggestions.len(),
                "Analysis response received"
            ),
            Err(err) => warn!(latency_ms, error = %err, "Analysis request failed"),
        }
        outcome
    }
}

fn transport_error(err: reqwest::Error, timeout_ms: u64) -> AnalysisError {
    if err.is_timeout() {
        AnalysisError::Timeout { timeout_ms }
    } else {
        AnalysisError::Network {
            cause: err.to_string(),
        }
    }
}
