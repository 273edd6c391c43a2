//! Human-readable output and the JSON report artifact.

use crate::aggregate::DocumentReview;
use crate::runtime::error::{PipelineError, PipelineResult};
use chrono::{SecondsFormat, Utc};
use content_contract::{Severity, ValidationIssue};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// One document's line in the report artifact.
#[derive(Clone, Debug, Serialize)]
pub struct DocumentSummary {
    pub slug: String,
    pub passed: bool,
    pub score: u32,
    pub issue_count: usize,
    pub warning_count: usize,
}

/// Aggregate counters for one batch run.
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub average_score: f64,
}

/// The batch report artifact, overwritten on every run.
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub generated_at: String,
    pub documents: Vec<DocumentSummary>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(reviews: &[DocumentReview]) -> Self {
        let documents: Vec<DocumentSummary> = reviews
            .iter()
            .map(|review| DocumentSummary {
                slug: review.slug.clone(),
                passed: review.overall.passed,
                score: review.overall.score,
                issue_count: review.overall.issues.len(),
                warning_count: review.overall.warnings.len(),
            })
            .collect();

        let passed = documents.iter().filter(|d| d.passed).count();
        let average_score = if documents.is_empty() {
            0.0
        } else {
            let sum: u32 = documents.iter().map(|d| d.score).sum();
            (sum as f64 / documents.len() as f64 * 100.0).round() / 100.0
        };

        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            summary: RunSummary {
                total: documents.len(),
                passed,
                failed: documents.len() - passed,
                average_score,
            },
            documents,
        }
    }
}

/// Write the report artifact, creating parent directories as needed.
pub fn write_report(output: &Path, report: &RunReport) -> PipelineResult<()> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            PipelineError::io(format!("failed to create {}: {err}", parent.display()))
        })?;
    }
    let body = serde_json::to_string_pretty(report)
        .map_err(|err| PipelineError::io(format!("failed to serialize report: {err}")))?;
    fs::write(output, format!("{body}\n"))
        .map_err(|err| PipelineError::io(format!("failed to write {}: {err}", output.display())))?;
    println!("Wrote content report: {}", output.display());
    Ok(())
}

/// Print one document's verdict with its findings grouped and sorted.
pub fn print_review(review: &DocumentReview) {
    let verdict = if review.overall.passed { "PASS" } else { "FAIL" };
    println!(
        "== {} {verdict} (score {})",
        review.slug, review.overall.score
    );

    let mut findings: Vec<&ValidationIssue> = review
        .overall
        .issues
        .iter()
        .chain(review.overall.warnings.iter())
        .collect();
    findings.sort_by(|a, b| {
        (a.category, a.line.unwrap_or(0), &a.message).cmp(&(b.category, b.line.unwrap_or(0), &b.message))
    });

    for finding in findings {
        let severity = match finding.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        let location = match finding.line {
            Some(line) => format!("{}:{line}", review.slug),
            None => review.slug.clone(),
        };
        println!(
            "  [{}] {severity} {location} - {}",
            finding.category, finding.message
        );
        if let Some(suggestion) = &finding.suggestion {
            println!("      suggestion: {suggestion}");
        }
    }
}

/// Print the batch footer.
pub fn print_summary(report: &RunReport) {
    println!(
        "\n{} document(s): {} passed, {} failed, average score {:.2}",
        report.summary.total, report.summary.passed, report.summary.failed,
        report.summary.average_score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::DocumentReview;
    use content_contract::{IssueCategory, ValidationResult};
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn review(slug: &str, findings: Vec<ValidationIssue>) -> DocumentReview {
        DocumentReview {
            slug: slug.to_string(),
            overall: ValidationResult::from_findings(findings),
            breakdown: BTreeMap::new(),
        }
    }

    #[test]
    fn summary_counts_failures_and_averages_scores() {
        let reviews = vec![
            review("clean", Vec::new()),
            review(
                "broken",
                vec![ValidationIssue::error(
                    IssueCategory::Links,
                    "broken internal link `/posts/nope`",
                )],
            ),
            review("fine", Vec::new()),
        ];
        let report = RunReport::new(&reviews);

        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.passed, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.average_score, 95.0);
        assert!(report.documents[1].issue_count >= 1);
    }

    #[test]
    fn report_artifact_round_trips_as_json() {
        let root = std::env::temp_dir().join(format!(
            "content-report-test-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ));
        let output = root.join(".artifacts/content-report.json");
        let report = RunReport::new(&[review("only", Vec::new())]);

        write_report(&output, &report).expect("write report");
        let body = fs::read_to_string(&output).expect("read report");
        let parsed: serde_json::Value = serde_json::from_str(&body).expect("parse report");
        assert_eq!(parsed["summary"]["total"], 1);
        assert_eq!(parsed["documents"][0]["slug"], "only");
        assert!(parsed["generated_at"].is_string());

        let _ = fs::remove_dir_all(PathBuf::from(root));
    }
}
