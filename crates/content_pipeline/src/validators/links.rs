//! Internal link graph checks.
//!
//! Works over the full corpus (published and unpublished) so broken targets
//! can be distinguished from merely-unpublished ones: the former are errors,
//! the latter warnings.

use crate::guidelines::LinkRules;
use crate::markdown;
use content_contract::{Document, IssueCategory, ValidationIssue, ValidationResult};
use std::collections::{BTreeSet, HashMap};

pub fn validate(document: &Document, corpus: &[Document], rules: &LinkRules) -> ValidationResult {
    let by_route: HashMap<String, &Document> =
        corpus.iter().map(|doc| (doc.route(), doc)).collect();

    let mut findings = Vec::new();
    let mut linked_routes = BTreeSet::new();
    let mut internal = 0usize;
    let mut valid = 0usize;

    for link in markdown::links(&document.body) {
        let Some(route) = normalize_internal(&link.target) else {
            continue;
        };
        internal += 1;
        match by_route.get(&route) {
            None => findings.push(
                ValidationIssue::error(
                    IssueCategory::Links,
                    format!("broken internal link `{}`", link.target),
                )
                .with_line(link.line),
            ),
            Some(target) if !target.is_published() => {
                linked_routes.insert(route);
                findings.push(
                    ValidationIssue::warning(
                        IssueCategory::Links,
                        format!("link target `{}` is unpublished", link.target),
                    )
                    .with_line(link.line),
                );
            }
            Some(_) => {
                linked_routes.insert(route);
                valid += 1;
            }
        }
    }

    if valid < rules.min_internal_links {
        findings.push(ValidationIssue::warning(
            IssueCategory::Links,
            format!(
                "{valid} valid internal link(s) (minimum {})",
                rules.min_internal_links
            ),
        ));
    }

    let related = related_unlinked(document, corpus, &linked_routes, rules.max_suggestions);
    if !related.is_empty() {
        findings.push(
            ValidationIssue::warning(IssueCategory::Links, "related content is not linked")
                .with_suggestion(format!("consider linking: {}", related.join(", "))),
        );
    }

    let own_route = document.route();
    let inbound = corpus
        .iter()
        .filter(|other| {
            other.slug != document.slug
                && other.is_published()
                && markdown::links(&other.body)
                    .iter()
                    .any(|link| normalize_internal(&link.target).as_deref() == Some(own_route.as_str()))
        })
        .count();
    if document.is_published() && inbound == 0 {
        findings.push(ValidationIssue::warning(
            IssueCategory::Links,
            "no inbound links from other published content",
        ));
    }

    ValidationResult::from_findings(findings)
        .with_metric("internal_links", internal)
        .with_metric("valid_internal_links", valid)
        .with_metric("inbound_links", inbound)
}

/// Normalize an internal link target to a document route, or `None` for
/// external and non-document targets. Anchors and queries are stripped.
fn normalize_internal(target: &str) -> Option<String> {
    let path = target
        .split(['#', '?'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    if path.starts_with("/posts/") || path.starts_with("/patterns/") {
        Some(path.to_string())
    } else {
        None
    }
}

/// Published documents sharing tags with `document`, not yet linked, ordered
/// by shared-tag count (slug as tiebreaker).
fn related_unlinked(
    document: &Document,
    corpus: &[Document],
    linked_routes: &BTreeSet<String>,
    limit: usize,
) -> Vec<String> {
    let own_tags: BTreeSet<&str> = document.frontmatter.tags.iter().map(String::as_str).collect();
    if own_tags.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, String)> = corpus
        .iter()
        .filter(|other| {
            other.slug != document.slug
                && other.is_published()
                && !linked_routes.contains(&other.route())
        })
        .filter_map(|other| {
            let shared = other
                .frontmatter
                .tags
                .iter()
                .filter(|tag| own_tags.contains(tag.as_str()))
                .count();
            (shared > 0).then(|| (shared, other.route()))
        })
        .collect();

    scored.sort_by(|a, b| (b.0, &a.1).cmp(&(a.0, &b.1)));
    scored.into_iter().take(limit).map(|(_, route)| route).collect()
}
