//! Aggregation of all validators over one document.

use crate::guidelines::GuidelineConfig;
use crate::validators;
use content_contract::{Document, IssueCategory, ValidationIssue, ValidationResult};
use std::collections::BTreeMap;
use std::path::Path;

/// Aggregated verdict for one document, with the per-validator breakdown.
#[derive(Clone, Debug)]
pub struct DocumentReview {
    pub slug: String,
    pub overall: ValidationResult,
    pub breakdown: BTreeMap<String, ValidationResult>,
}

/// Run every validator over a loaded document and merge the outcome.
///
/// All six validators contribute issues and warnings. The overall score is
/// the weighted average of the frontmatter, voice, structure, and seo scores;
/// images and links gate `passed` through their errors but stay out of the
/// weighted score (see DESIGN.md for the weighting decision).
pub fn review_document(
    root: &Path,
    config: &GuidelineConfig,
    corpus: &[Document],
    document: &Document,
) -> DocumentReview {
    let mut breakdown = BTreeMap::new();
    breakdown.insert(
        "frontmatter".to_string(),
        validators::frontmatter::validate(document, &config.frontmatter),
    );
    breakdown.insert(
        "structure".to_string(),
        validators::structure::validate(document, &config.structure),
    );
    breakdown.insert(
        "voice".to_string(),
        validators::voice::validate(document, &config.voice),
    );
    breakdown.insert("seo".to_string(), validators::seo::validate(document));
    breakdown.insert(
        "images".to_string(),
        validators::images::validate(root, document, &config.images),
    );
    breakdown.insert(
        "links".to_string(),
        validators::links::validate(document, corpus, &config.links),
    );

    let mut issues = Vec::new();
    let mut warnings = Vec::new();
    let mut metrics = BTreeMap::new();
    // Merge in a stable category order, not map order.
    for name in ["frontmatter", "structure", "voice", "seo", "images", "links"] {
        let result = &breakdown[name];
        issues.extend(result.issues.iter().cloned());
        warnings.extend(result.warnings.iter().cloned());
        metrics.extend(result.metrics.clone());
    }

    let overall = ValidationResult {
        passed: issues.is_empty(),
        score: weighted_score(config, &breakdown),
        issues,
        warnings,
        metrics,
    };

    DocumentReview {
        slug: document.slug.clone(),
        overall,
        breakdown,
    }
}

/// Review the document with the given slug, or synthesize a failing result
/// when no such document can be loaded. Missing content is a reported
/// condition here, never an error.
pub fn review_slug(
    root: &Path,
    config: &GuidelineConfig,
    corpus: &[Document],
    slug: &str,
) -> DocumentReview {
    match corpus.iter().find(|doc| doc.slug == slug) {
        Some(document) => review_document(root, config, corpus, document),
        None => not_found(slug),
    }
}

fn not_found(slug: &str) -> DocumentReview {
    let issue = ValidationIssue::error(
        IssueCategory::Frontmatter,
        format!("document `{slug}` not found"),
    );
    DocumentReview {
        slug: slug.to_string(),
        overall: ValidationResult {
            passed: false,
            score: 0,
            issues: vec![issue],
            warnings: Vec::new(),
            metrics: BTreeMap::new(),
        },
        breakdown: BTreeMap::new(),
    }
}

fn weighted_score(config: &GuidelineConfig, breakdown: &BTreeMap<String, ValidationResult>) -> u32 {
    let weights = config.scoring;
    let pairs = [
        ("frontmatter", weights.technical_depth),
        ("structure", weights.structure),
        ("voice", weights.voice_alignment),
        ("seo", weights.seo_readiness),
    ];

    let total: f64 = pairs.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return 0;
    }

    let sum: f64 = pairs
        .iter()
        .filter_map(|(name, weight)| breakdown.get(*name).map(|r| r.score as f64 * weight))
        .sum();
    (sum / total).round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidelines::sample_config;
    use content_contract::DocumentKind;
    use std::path::PathBuf;

    fn clean_post(slug: &str) -> Document {
        let body = format!(
            "The retro desktop era shaped UI design. See [rooms](/posts/other).\n\n\
             ## Why the retro desktop mattered\n\n{}\n\n## Conclusion\n\nWe keep what works.\n",
            "word ".repeat(60)
        );
        let raw = format!(
            "---\n\
             title: Retro desktop history\n\
             date: 2025-04-02\n\
             excerpt: A reasonable excerpt that is long enough to pass.\n\
             tags:\n  - design\n  - history\n\
             keywords:\n  - retro desktop\n\
             published: true\n\
             thumbnail: /images/t.png\n\
             thumbnail_blur: data:image/jpeg;base64,x\n\
             hero_image: /images/h.png\n\
             hero_blur: data:image/jpeg;base64,x\n\
             ---\n{body}"
        );
        Document::parse(slug, DocumentKind::Post, &raw).expect("parse")
    }

    fn other_post() -> Document {
        let raw = "---\ntitle: Other rooms\ndate: 2025-01-01\npublished: true\ntags:\n  - design\n---\nBack to [history](/posts/subject).\n";
        Document::parse("other", DocumentKind::Post, raw).expect("parse")
    }

    #[test]
    fn merge_collects_all_categories_and_passes_without_errors() {
        let config = sample_config();
        let subject = clean_post("subject");
        let corpus = vec![subject.clone(), other_post()];
        // Nonexistent root: image files resolve to warnings, not errors.
        let review = review_document(&PathBuf::from("/nonexistent"), &config, &corpus, &subject);

        assert!(review.overall.passed, "issues: {:?}", review.overall.issues);
        assert_eq!(review.breakdown.len(), 6);
        assert!(review
            .overall
            .warnings
            .iter()
            .any(|w| w.category == IssueCategory::Images));
    }

    #[test]
    fn overall_score_is_the_weighted_average_of_four_validators() {
        let config = sample_config();
        let subject = clean_post("subject");
        let corpus = vec![subject.clone(), other_post()];
        let review = review_document(&PathBuf::from("/nonexistent"), &config, &corpus, &subject);

        let weights = [
            ("frontmatter", config.scoring.technical_depth),
            ("structure", config.scoring.structure),
            ("voice", config.scoring.voice_alignment),
            ("seo", config.scoring.seo_readiness),
        ];
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        let expected: f64 = weights
            .iter()
            .map(|(name, w)| review.breakdown[*name].score as f64 * w)
            .sum::<f64>()
            / total;
        assert_eq!(review.overall.score, expected.round() as u32);
    }

    #[test]
    fn image_warnings_do_not_affect_the_weighted_score() {
        let config = sample_config();
        let subject = clean_post("subject");
        let corpus = vec![subject.clone(), other_post()];
        let review = review_document(&PathBuf::from("/nonexistent"), &config, &corpus, &subject);

        // Unreachable image files produced warnings in the breakdown...
        assert!(review.breakdown["images"].score < 100);
        // ...but the weighted average only reads the four scored validators.
        let score_without_images = review.overall.score;
        assert!(score_without_images >= review.breakdown["images"].score);
    }

    #[test]
    fn unknown_slug_synthesizes_a_failing_review() {
        let config = sample_config();
        let review = review_slug(&PathBuf::from("/nonexistent"), &config, &[], "ghost");
        assert!(!review.overall.passed);
        assert_eq!(review.overall.score, 0);
        assert_eq!(review.overall.issues.len(), 1);
        assert!(review.overall.issues[0].message.contains("not found"));
        assert!(review.breakdown.is_empty());
    }
}
