//! Keyword-placement checks.
//!
//! Everything here is advisory: absences are warnings, never errors.

use crate::markdown;
use content_contract::{Document, IssueCategory, ValidationIssue, ValidationResult};

pub fn validate(document: &Document) -> ValidationResult {
    let Some(primary) = document.frontmatter.keywords.first() else {
        let findings = vec![ValidationIssue::warning(
            IssueCategory::Seo,
            "no keywords defined; skipping keyword placement checks",
        )
        .with_field("keywords")];
        return ValidationResult::from_findings(findings);
    };
    let needle = primary.to_lowercase();
    let mut findings = Vec::new();

    let title = document.frontmatter.title.as_deref().unwrap_or("");
    if !title.to_lowercase().contains(&needle) {
        findings.push(
            ValidationIssue::warning(
                IssueCategory::Seo,
                format!("primary keyword `{primary}` missing from title"),
            )
            .with_field("title")
            .with_suggestion(format!("work `{primary}` into the title")),
        );
    }

    let first_paragraph = markdown::first_paragraph(&document.body).unwrap_or_default();
    if !first_paragraph.to_lowercase().contains(&needle) {
        findings.push(
            ValidationIssue::warning(
                IssueCategory::Seo,
                format!("primary keyword `{primary}` missing from the first paragraph"),
            )
            .with_suggestion(format!("mention `{primary}` early in the introduction")),
        );
    }

    let in_section_heading = markdown::headings(&document.body)
        .iter()
        .filter(|h| h.level == 2)
        .any(|h| h.text.to_lowercase().contains(&needle));
    if !in_section_heading {
        findings.push(
            ValidationIssue::warning(
                IssueCategory::Seo,
                format!("primary keyword `{primary}` missing from every section heading"),
            )
            .with_suggestion(format!("use `{primary}` in at least one `##` heading")),
        );
    }

    ValidationResult::from_findings(findings).with_metric("primary_keyword", primary.clone())
}
