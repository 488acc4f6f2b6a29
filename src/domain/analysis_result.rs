use serde::{Deserialize, Serialize};
use validator::Validate;

/// Structured quality report returned by the analysis service.
///
/// The service speaks Spanish on the wire; the English field names are
/// accepted as aliases so fixtures and other producers can use either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AnalysisResult {
    #[serde(rename = "metricas", alias = "metrics")]
    #[validate(nested)]
    pub metrics: Metrics,
    #[serde(rename = "observaciones", alias = "observations", default)]
    #[validate(nested)]
    pub observations: Vec<Finding>,
    #[serde(rename = "sugerencias", alias = "suggestions", default)]
    #[validate(nested)]
    pub suggestions: Vec<Finding>,
}

impl AnalysisResult {
    /// True when the service found nothing to report. Still a valid report.
    pub fn has_no_findings(&self) -> bool {
        self.observations.is_empty() && self.suggestions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Metrics {
    #[serde(rename = "porcentaje_valores_faltantes", alias = "missingValuesPct")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub missing_values_pct: f64,
    #[serde(rename = "porcentaje_filas_duplicadas", alias = "duplicateRowsPct")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub duplicate_rows_pct: f64,
    #[serde(rename = "salud_del_dataset", alias = "datasetHealthPct")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub dataset_health_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Finding {
    #[serde(rename = "titulo", alias = "title")]
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(rename = "mensaje", alias = "message", default)]
    pub message: String,
    /// Free-form category label chosen by the service.
    #[serde(rename = "tipo_de_reporte", alias = "reportKind", default)]
    pub report_kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_service_payload_with_integer_metrics() {
        let payload = json!({
            "observaciones": [
                {"tipo_de_reporte": "observacion", "titulo": "Outliers", "mensaje": "Column price"}
            ],
            "metricas": {
                "porcentaje_valores_faltantes": 15,
                "porcentaje_filas_duplicadas": 5,
                "salud_del_dataset": 75
            },
            "sugerencias": []
        });

        let result: AnalysisResult = serde_json::from_value(payload).unwrap();
        assert_eq!(result.metrics.missing_values_pct, 15.0);
        assert_eq!(result.metrics.dataset_health_pct, 75.0);
        assert_eq!(result.observations.len(), 1);
        assert_eq!(result.observations[0].report_kind, "observacion");
        assert!(result.suggestions.is_empty());
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_decodes_english_aliases() {
        let payload = json!({
            "metrics": {"missingValuesPct": 5.0, "duplicateRowsPct": 0.0, "datasetHealthPct": 95.0},
            "observations": [],
            "suggestions": [{"title": "Low missing data", "message": "...", "reportKind": "info"}]
        });

        let result: AnalysisResult = serde_json::from_value(payload).unwrap();
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions[0].title, "Low missing data");
        assert!(!result.has_no_findings());
    }

    #[test]
    fn test_empty_findings_are_valid() {
        let result = AnalysisResult {
            metrics: Metrics {
                missing_values_pct: 0.0,
                duplicate_rows_pct: 0.0,
                dataset_health_pct: 100.0,
            },
            observations: Vec::new(),
            suggestions: Vec::new(),
        };
        assert!(result.validate().is_ok());
        assert!(result.has_no_findings());
    }

    #[test]
    fn test_rejects_out_of_range_metric() {
        let result = AnalysisResult {
            metrics: Metrics {
                missing_values_pct: 120.0,
                duplicate_rows_pct: 0.0,
                dataset_health_pct: 50.0,
            },
            observations: Vec::new(),
            suggestions: Vec::new(),
        };
        assert!(result.validate().is_err());
    }

    #[test]
    fn test_rejects_finding_without_title() {
        let finding = Finding {
            title: String::new(),
            message: "text".to_string(),
            report_kind: "info".to_string(),
        };
        assert!(finding.validate().is_err());
    }
}
