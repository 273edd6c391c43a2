//! Frontmatter field checks.

use crate::guidelines::FrontmatterRules;
use content_contract::{Document, DocumentKind, IssueCategory, ValidationIssue, ValidationResult};

pub fn validate(document: &Document, rules: &FrontmatterRules) -> ValidationResult {
    let mut findings = Vec::new();
    let fm = &document.frontmatter;

    let title = fm.title.as_deref().unwrap_or("").trim();
    check_length(
        &mut findings,
        "title",
        title,
        rules.title_min,
        rules.title_max,
    );
    for word in &rules.forbidden_title_words {
        if contains_word(title, word) {
            findings.push(
                ValidationIssue::warning(
                    IssueCategory::Frontmatter,
                    format!("title contains discouraged word `{word}`"),
                )
                .with_field("title"),
            );
        }
    }

    let excerpt = fm.excerpt.as_deref().unwrap_or("").trim();
    check_length(
        &mut findings,
        "excerpt",
        excerpt,
        rules.excerpt_min,
        rules.excerpt_max,
    );

    check_count(
        &mut findings,
        "tags",
        fm.tags.len(),
        rules.tags_min,
        rules.tags_max,
    );
    check_count(
        &mut findings,
        "keywords",
        fm.keywords.len(),
        rules.keywords_min,
        rules.keywords_max,
    );

    match document.kind {
        DocumentKind::Post => {
            match fm.date.as_deref() {
                None => findings.push(
                    ValidationIssue::error(IssueCategory::Frontmatter, "date is required for posts")
                        .with_field("date"),
                ),
                Some(date) if document.date().is_none() => findings.push(
                    ValidationIssue::error(
                        IssueCategory::Frontmatter,
                        format!("date `{date}` is not a valid ISO date (YYYY-MM-DD)"),
                    )
                    .with_field("date"),
                ),
                Some(_) => {}
            }

            for (field, value) in [("thumbnail", &fm.thumbnail), ("hero_image", &fm.hero_image)] {
                if value.is_none() {
                    findings.push(
                        ValidationIssue::warning(
                            IssueCategory::Frontmatter,
                            format!("no `{field}` image declared"),
                        )
                        .with_field(field)
                        .with_suggestion(format!("add a `{field}` path under /images")),
                    );
                }
            }
        }
        DocumentKind::Pattern => {
            for (field, value) in [("chapter", fm.chapter), ("number", fm.number)] {
                if value.is_none() {
                    findings.push(
                        ValidationIssue::error(
                            IssueCategory::Frontmatter,
                            format!("`{field}` is required for patterns"),
                        )
                        .with_field(field),
                    );
                }
            }
        }
    }

    ValidationResult::from_findings(findings)
        .with_metric("title_length", title.chars().count())
        .with_metric("excerpt_length", excerpt.chars().count())
        .with_metric("tag_count", fm.tags.len())
        .with_metric("keyword_count", fm.keywords.len())
}

fn check_length(
    findings: &mut Vec<ValidationIssue>,
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    let length = value.chars().count();
    if length < min {
        findings.push(
            ValidationIssue::error(
                IssueCategory::Frontmatter,
                format!("{field} is {length} characters (minimum {min})"),
            )
            .with_field(field),
        );
    } else if length > max {
        findings.push(
            ValidationIssue::error(
                IssueCategory::Frontmatter,
                format!("{field} is {length} characters (maximum {max})"),
            )
            .with_field(field),
        );
    }
}

fn check_count(
    findings: &mut Vec<ValidationIssue>,
    field: &str,
    count: usize,
    min: usize,
    max: usize,
) {
    if count < min {
        findings.push(
            ValidationIssue::error(
                IssueCategory::Frontmatter,
                format!("{count} {field} listed (minimum {min})"),
            )
            .with_field(field),
        );
    } else if count > max {
        findings.push(
            ValidationIssue::error(
                IssueCategory::Frontmatter,
                format!("{count} {field} listed (maximum {max})"),
            )
            .with_field(field),
        );
    }
}

fn contains_word(text: &str, word: &str) -> bool {
    let word = word.to_lowercase();
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}
