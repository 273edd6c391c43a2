//! Brand-voice heuristics: forbidden phrases, passive voice, sentence length.

use crate::guidelines::VoiceRules;
use crate::markdown;
use content_contract::{Document, IssueCategory, ValidationIssue, ValidationResult};
use regex::Regex;

/// Passive constructions: auxiliary + past participle, plus the `by`-agent
/// form. Heuristic by design; the percentage threshold absorbs false hits.
const PASSIVE_PATTERNS: &[&str] = &[
    r"(?i)\b(?:was|were)\s+\w+(?:ed|en)\b",
    r"(?i)\b(?:is|are|am)\s+being\s+\w+(?:ed|en)\b",
    r"(?i)\b(?:has|have|had)\s+been\s+\w+(?:ed|en)\b",
    r"(?i)\b(?:is|are)\s+\w+(?:ed|en)\s+by\b",
];

pub fn validate(document: &Document, rules: &VoiceRules) -> ValidationResult {
    let mut findings = Vec::new();
    let prose = markdown::prose(&document.body);

    for phrase in &rules.forbidden_phrases {
        let Ok(pattern) = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase))) else {
            continue;
        };
        let count = pattern.find_iter(&prose).count();
        if count == 0 {
            continue;
        }
        let mut issue = ValidationIssue::error(
            IssueCategory::Voice,
            format!("forbidden phrase `{phrase}` used {count} time(s)"),
        );
        if let Some(preferred) = rules.preferred_phrases.get(phrase) {
            issue = issue.with_suggestion(format!("prefer `{preferred}`"));
        }
        findings.push(issue);
    }

    let sentences = markdown::sentences(&prose);
    let passive_patterns: Vec<Regex> = PASSIVE_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect();
    let passive_count = sentences
        .iter()
        .filter(|sentence| passive_patterns.iter().any(|p| p.is_match(sentence)))
        .count();
    let passive_percent = if sentences.is_empty() {
        0.0
    } else {
        passive_count as f64 / sentences.len() as f64 * 100.0
    };
    if passive_percent > rules.max_passive_percent {
        findings.push(
            ValidationIssue::warning(
                IssueCategory::Voice,
                format!(
                    "{passive_percent:.0}% of sentences are passive (maximum {:.0}%)",
                    rules.max_passive_percent
                ),
            )
            .with_suggestion("rewrite passive constructions in active voice"),
        );
    }

    let long_sentences = sentences
        .iter()
        .filter(|sentence| sentence.split_whitespace().count() > rules.max_sentence_words)
        .count();
    if long_sentences > rules.long_sentence_allowance {
        findings.push(
            ValidationIssue::warning(
                IssueCategory::Voice,
                format!(
                    "{long_sentences} sentences exceed {} words",
                    rules.max_sentence_words
                ),
            )
            .with_suggestion("split long sentences"),
        );
    }

    ValidationResult::from_findings(findings)
        .with_metric("sentence_count", sentences.len())
        .with_metric("passive_percent", (passive_percent * 10.0).round() / 10.0)
        .with_metric("long_sentences", long_sentences)
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

    #[test]
    fn forbidden_phrases_are_counted_with_word_boundaries() {
        let body = "This is a game changer. We leverage tools. Leverages is different.\n";
        let result = validate(&doc(body), &sample_config().voice);
        assert_eq!(result.issues.len(), 2);
        let leverage = result
            .issues
            .iter()
            .find(|i| i.message.contains("`leverage`"))
            .expect("leverage issue");
        assert!(leverage.message.contains("1 time(s)"));
        assert_eq!(leverage.suggestion.as_deref(), Some("prefer `use`"));
    }

    #[test]
    fn passive_heavy_text_warns() {
        let body = "The patch was merged. The bug was fixed. The test was added. All good here.\n";
        let result = validate(&doc(body), &sample_config().voice);
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("passive"));
    }

    #[test]
    fn active_text_is_clean() {
        let body = "We merged the patch. We fixed the bug. We added a test.\n";
        let result = validate(&doc(body), &sample_config().voice);
        assert!(result.passed);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn a_few_long_sentences_are_tolerated() {
        let long = format!("{} end.", "very ".repeat(35));
        let three = format!("{long} {long} {long}");
        let result = validate(&doc(&three), &sample_config().voice);
        assert!(result.warnings.is_empty(), "unexpected: {:?}", result.warnings);

        let five = format!("{long} {long} {long} {long} {long}");
        let result = validate(&doc(&five), &sample_config().voice);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("exceed 30 words"));
    }
}
