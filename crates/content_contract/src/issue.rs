//! Validation issue and result types.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

const ERROR_PENALTY: i64 = 15;
const WARNING_PENALTY: i64 = 5;

/// Severity of a single finding. Errors block publishing; warnings never do.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Concern a finding belongs to, matching the validator that produced it.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Frontmatter,
    Structure,
    Seo,
    Voice,
    Images,
    Links,
}

impl IssueCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueCategory::Frontmatter => "frontmatter",
            IssueCategory::Structure => "structure",
            IssueCategory::Seo => "seo",
            IssueCategory::Voice => "voice",
            IssueCategory::Images => "images",
            IssueCategory::Links => "links",
        }
    }
}

impl Display for IssueCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding from one validator run.
///
/// Issues are plain facts with no identity beyond their content. Optional
/// `field`, `suggestion`, and `line` metadata is attached with the builder
/// methods as the producing validator sees fit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub category: IssueCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl ValidationIssue {
    /// Create an error-severity finding.
    pub fn error(category: IssueCategory, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, category, message)
    }

    /// Create a warning-severity finding.
    pub fn warning(category: IssueCategory, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, category, message)
    }

    fn new(severity: Severity, category: IssueCategory, message: impl Into<String>) -> Self {
        Self {
            severity,
            category,
            field: None,
            message: message.into(),
            suggestion: None,
            line: None,
        }
    }

    /// Attach the frontmatter field or image role the finding refers to.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Attach a remediation suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach a 1-based body line number.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Outcome of one validator (or the aggregator) over one document.
#[derive(Clone, Debug, Serialize)]
pub struct ValidationResult {
    pub passed: bool,
    pub score: u32,
    pub issues: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: BTreeMap<String, serde_json::Value>,
}

impl ValidationResult {
    /// Build a result from a mixed list of findings.
    ///
    /// Errors land in `issues`, warnings in `warnings`; `passed` is true iff
    /// there are no errors, regardless of warning count.
    pub fn from_findings(findings: Vec<ValidationIssue>) -> Self {
        let (issues, warnings): (Vec<_>, Vec<_>) = findings
            .into_iter()
            .partition(|issue| issue.severity == Severity::Error);
        Self {
            passed: issues.is_empty(),
            score: score_for(issues.len(), warnings.len()),
            issues,
            warnings,
            metrics: BTreeMap::new(),
        }
    }

    /// Attach a named metric to the result.
    pub fn with_metric(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metrics.insert(key.to_string(), value.into());
        self
    }
}

/// Score a finding tally: `max(0, 100 - 15*errors - 5*warnings)`.
pub fn score_for(errors: usize, warnings: usize) -> u32 {
    (100 - ERROR_PENALTY * errors as i64 - WARNING_PENALTY * warnings as i64).max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_clamped_to_zero() {
        assert_eq!(score_for(0, 0), 100);
        assert_eq!(score_for(2, 0), 70);
        assert_eq!(score_for(1, 3), 70);
        assert_eq!(score_for(7, 0), 0);
        assert_eq!(score_for(100, 100), 0);
    }

    #[test]
    fn adding_findings_never_raises_the_score() {
        let mut previous = score_for(0, 0);
        for count in 1..40usize {
            let next = score_for(count / 2, count - count / 2);
            assert!(next <= previous, "score rose at {count} findings");
            previous = next;
        }
    }

    #[test]
    fn passed_tracks_errors_only() {
        let warnings_only = ValidationResult::from_findings(vec![
            ValidationIssue::warning(IssueCategory::Seo, "keyword missing from title"),
            ValidationIssue::warning(IssueCategory::Images, "blur placeholder missing"),
        ]);
        assert!(warnings_only.passed);
        assert_eq!(warnings_only.score, 90);

        let with_error = ValidationResult::from_findings(vec![ValidationIssue::error(
            IssueCategory::Structure,
            "word count below minimum",
        )]);
        assert!(!with_error.passed);
        assert_eq!(with_error.issues.len(), 1);
    }
}
