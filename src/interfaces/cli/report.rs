use std::fmt::Write;

use crate::domain::analysis_result::{AnalysisResult, Finding};

/// Plain-text rendering of a report for the terminal.
pub fn render(file_label: &str, result: &AnalysisResult) -> String {
    let mut out = String::new();
    let metrics = &result.metrics;

    let _ = writeln!(out, "Dataset report: {}", file_label);
    let _ = writeln!(out);
    let _ = writeln!(out, "  Missing values   {:>6.1}%", metrics.missing_values_pct);
    let _ = writeln!(out, "  Duplicate rows   {:>6.1}%", metrics.duplicate_rows_pct);
    let _ = writeln!(out, "  Dataset health   {:>6.1}%", metrics.dataset_health_pct);

    render_section(&mut out, "Observations", &result.observations);
    render_section(&mut out, "Suggestions", &result.suggestions);
    out
}

fn render_section(out: &mut String, heading: &str, findings: &[Finding]) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{} ({})", heading, findings.len());
    if findings.is_empty() {
        let _ = writeln!(out, "  No findings.");
        return;
    }
    for finding in findings {
        if finding.report_kind.trim().is_empty() {
            let _ = writeln!(out, "  - {}", finding.title);
        } else {
            let _ = writeln!(out, "  - [{}] {}", finding.report_kind, finding.title);
        }
        if !finding.message.trim().is_empty() {
            let _ = writeln!(out, "      {}", finding.message);
        }
    }
}
