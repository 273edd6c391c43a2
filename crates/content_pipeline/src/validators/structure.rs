//! Structural checks over the document body.

use crate::guidelines::StructureRules;
use crate::markdown;
use content_contract::{Document, IssueCategory, ValidationIssue, ValidationResult};

pub fn validate(document: &Document, rules: &StructureRules) -> ValidationResult {
    let mut findings = Vec::new();
    let body = &document.body;

    let words = markdown::word_count(body);
    if words < rules.word_count_min {
        findings.push(ValidationIssue::error(
            IssueCategory::Structure,
            format!("word count {words} is below minimum {}", rules.word_count_min),
        ));
    } else if words > rules.word_count_max {
        findings.push(ValidationIssue::error(
            IssueCategory::Structure,
            format!("word count {words} exceeds maximum {}", rules.word_count_max),
        ));
    }

    let headings = markdown::headings(body);
    let sections: Vec<_> = headings.iter().filter(|h| h.level == 2).collect();
    if sections.len() < rules.min_section_headings {
        findings.push(ValidationIssue::error(
            IssueCategory::Structure,
            format!(
                "{} level-2 section headings (minimum {})",
                sections.len(),
                rules.min_section_headings
            ),
        ));
    }

    let has_conclusion = sections.iter().any(|heading| {
        rules
            .conclusion_headings
            .iter()
            .any(|name| heading.text.eq_ignore_ascii_case(name))
    });
    if !has_conclusion {
        findings.push(
            ValidationIssue::warning(IssueCategory::Structure, "no closing section found")
                .with_suggestion(format!(
                    "end with one of: {}",
                    rules.conclusion_headings.join(", ")
                )),
        );
    }

    // One warning per document, not one per block.
    if let Some(line) = markdown::first_untagged_fence(body) {
        findings.push(
            ValidationIssue::warning(
                IssueCategory::Structure,
                "fenced code block without a language tag",
            )
            .with_line(line),
        );
    }

    ValidationResult::from_findings(findings)
        .with_metric("word_count", words)
        .with_metric("section_headings", sections.len())
        .with_metric("reading_minutes", document.reading_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidelines::sample_config;
    use content_contract::DocumentKind;

    fn doc(body: &str) -> Document {
        let raw = format!("---\ntitle: T\n---\n{body}");
        Document::parse("t", DocumentKind::Post, &raw).expect("parse")
    }

    fn filler(words: usize) -> String {
        "word ".repeat(words)
    }

    #[test]
    fn complete_body_passes() {
        let body = format!(
            "{}\n## One\n{}\n## Conclusion\n{}\n",
            filler(20),
            filler(20),
            filler(20)
        );
        let result = validate(&doc(&body), &sample_config().structure);
        assert!(result.passed, "unexpected issues: {:?}", result.issues);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn thin_body_fails_on_words_and_sections() {
        let result = validate(&doc("just a few words\n"), &sample_config().structure);
        assert_eq!(result.issues.len(), 2);
        assert!(!result.passed);
    }

    #[test]
    fn conclusion_match_is_case_insensitive() {
        let body = format!("{}\n## one\n## WRAPPING UP\ndone\n", filler(60));
        let result = validate(&doc(&body), &sample_config().structure);
        assert!(result.warnings.is_empty(), "unexpected: {:?}", result.warnings);
    }

    #[test]
    fn untagged_fences_warn_once() {
        let body = format!(
            "{}\n## One\n```\na\n```\n\n```\nb\n```\n## Conclusion\ndone\n",
            filler(60)
        );
        let result = validate(&doc(&body), &sample_config().structure);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].line.is_some());
    }

    #[test]
    fn fenced_code_is_not_counted_as_words() {
        let body = format!(
            "{}\n## One\n```rust\n{}\n```\n## Conclusion\ndone\n",
            filler(60),
            filler(5000)
        );
        let result = validate(&doc(&body), &sample_config().structure);
        assert!(result.passed, "unexpected issues: {:?}", result.issues);
    }
}
