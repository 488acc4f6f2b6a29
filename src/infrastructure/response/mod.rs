use serde_json::Value;
use validator::Validate;

use crate::domain::analysis_result::AnalysisResult;
use crate::domain::error::{AnalysisError, Result};

/// Decodes a 2xx body into a report and checks it before anyone renders it.
pub fn decode_analysis_result(body: &[u8]) -> Result<AnalysisResult> {
    let result: AnalysisResult =
        serde_json::from_slice(body).map_err(|e| AnalysisError::MalformedResponse {
            reason: format!("Failed to parse analysis result: {}", e),
        })?;

    result
        .validate()
        .map_err(|e| AnalysisError::MalformedResponse {
            reason: format!("Analysis result failed validation: {}", e),
        })?;

    Ok(result)
}

/// Maps a non-success response to `AnalysisError::Service`.
pub fn service_error(status_code: u16, body: &[u8]) -> AnalysisError {
    let detail_message = extract_detail(body)
        .unwrap_or_else(|| format!("analysis service returned HTTP {}", status_code));
    AnalysisError::Service {
        status_code,
        detail_message,
    }
}

/// `detail` is a string for handled errors and a list of `{loc, msg, type}`
/// objects when the service rejects the request shape.
fn extract_detail(body: &[u8]) -> Option<String> {
    let json: Value = serde_json::from_slice(body).ok()?;
    match json.get("detail")? {
        Value::String(message) if !message.trim().is_empty() => Some(message.trim().to_string()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .filter(|msg| !msg.trim().is_empty())
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_uses_detail_string() {
        let err = service_error(500, br#"{"detail":"internal error"}"#);
        assert_eq!(
            err,
            AnalysisError::Service {
                status_code: 500,
                detail_message: "internal error".to_string(),
            }
        );
    }

    #[test]
    fn test_service_error_joins_validation_messages() {
        let body = br#"{"detail":[{"loc":["body","file"],"msg":"field required","type":"value_error.missing"},{"msg":"too large"}]}"#;
        match service_error(422, body) {
            AnalysisError::Service { detail_message, .. } => {
                assert_eq!(detail_message, "field required; too large")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_service_error_generic_message() {
        let bodies: [&[u8]; 4] = [b"<html>Bad Gateway</html>", b"{}", br#"{"detail":""}"#, b""];
        for body in bodies {
            match service_error(502, body) {
                AnalysisError::Service {
                    status_code,
                    detail_message,
                } => {
                    assert_eq!(status_code, 502);
                    assert_eq!(detail_message, "analysis service returned HTTP 502");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let err = decode_analysis_result(br#"{"observaciones": []}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse { .. }));

        let err = decode_analysis_result(b"not json").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse { .. }));
    }

    #[test]
    fn test_decode_rejects_out_of_range_metrics() {
        let body = br#"{"metricas":{"porcentaje_valores_faltantes":140,"porcentaje_filas_duplicadas":0,"salud_del_dataset":10},"observaciones":[],"sugerencias":[]}"#;
        let err = decode_analysis_result(body).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse { .. }));
    }

    #[test]
    fn test_decode_accepts_empty_findings() {
        let body = br#"{"metricas":{"porcentaje_valores_faltantes":0,"porcentaje_filas_duplicadas":0,"salud_del_dataset":100},"observaciones":[],"sugerencias":[]}"#;
        let result = decode_analysis_result(body).unwrap();
        assert!(result.has_no_findings());
    }
}
