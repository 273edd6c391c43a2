//! Image asset checks for the thumbnail and hero roles.
//!
//! Missing, unreadable, or undecodable assets are warnings so one bad image
//! never fails an otherwise-fine document; dimension and size violations are
//! errors because the role specs are hard requirements.

use crate::assets;
use crate::guidelines::{ImageRules, ImageSpec};
use content_contract::{Document, DocumentKind, IssueCategory, ValidationIssue, ValidationResult};
use image::GenericImageView;
use std::path::Path;

pub fn validate(root: &Path, document: &Document, rules: &ImageRules) -> ValidationResult {
    // Image roles are a post concern; patterns carry no artwork.
    if document.kind == DocumentKind::Pattern {
        return ValidationResult::from_findings(Vec::new()).with_metric("images_checked", 0);
    }

    let fm = &document.frontmatter;
    let roles = [
        ("thumbnail", &fm.thumbnail, &fm.thumbnail_blur, rules.thumbnail),
        ("hero_image", &fm.hero_image, &fm.hero_blur, rules.hero),
    ];

    let mut findings = Vec::new();
    let mut checked = 0usize;

    for (role, source, blur, spec) in roles {
        let Some(source) = source.as_deref() else {
            continue;
        };

        if blur.is_none() {
            findings.push(
                ValidationIssue::warning(
                    IssueCategory::Images,
                    format!("{role} has no blur placeholder"),
                )
                .with_field(role)
                .with_suggestion("run `content prepare --fix` to generate one"),
            );
        }

        let bytes = match assets::load_asset_bytes(root, source) {
            Ok(bytes) => bytes,
            Err(err) => {
                findings.push(
                    ValidationIssue::warning(
                        IssueCategory::Images,
                        format!("{role} `{source}` is unavailable: {err}"),
                    )
                    .with_field(role),
                );
                continue;
            }
        };
        checked += 1;

        findings.extend(check_spec(role, source, &bytes, spec));
    }

    ValidationResult::from_findings(findings).with_metric("images_checked", checked)
}

fn check_spec(role: &str, source: &str, bytes: &[u8], spec: ImageSpec) -> Vec<ValidationIssue> {
    let mut findings = Vec::new();

    if bytes.len() as u64 > spec.max_bytes {
        findings.push(
            ValidationIssue::error(
                IssueCategory::Images,
                format!(
                    "{role} `{source}` is {} bytes (budget {})",
                    bytes.len(),
                    spec.max_bytes
                ),
            )
            .with_field(role)
            .with_suggestion("re-export the image with stronger compression"),
        );
    }

    match image::load_from_memory(bytes) {
        Ok(decoded) => {
            let (width, height) = decoded.dimensions();
            if (width, height) != (spec.width, spec.height) {
                findings.push(
                    ValidationIssue::error(
                        IssueCategory::Images,
                        format!(
                            "{role} `{source}` is {width}x{height} (required {}x{})",
                            spec.width, spec.height
                        ),
                    )
                    .with_field(role),
                );
            }
        }
        Err(err) => findings.push(
            ValidationIssue::warning(
                IssueCategory::Images,
                format!("{role} `{source}` could not be decoded: {err}"),
            )
            .with_field(role),
        ),
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidelines::sample_config;
    use image::{ImageFormat, RgbImage};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_test_root() -> PathBuf {
        std::env::temp_dir().join(format!(
            "content-images-test-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ))
    }

    fn write_png(root: &Path, rel: &str, width: u32, height: u32) {
        let path = assets::resolve_asset_path(root, rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("create image dir");
        RgbImage::new(width, height)
            .save_with_format(&path, ImageFormat::Png)
            .expect("write png");
    }

    fn post(frontmatter: &str) -> Document {
        let raw = format!("---\ntitle: T\n{frontmatter}\n---\nbody\n");
        Document::parse("t", DocumentKind::Post, &raw).expect("parse")
    }

    #[test]
    fn missing_hero_file_is_one_warning_not_an_error() {
        let root = unique_test_root();
        fs::create_dir_all(&root).expect("create root");
        let doc = post("hero_image: /images/h.png\nhero_blur: data:image/jpeg;base64,x");

        let result = validate(&root, &doc, &sample_config().images);
        assert!(result.passed);
        assert_eq!(result.issues.len(), 0);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.score, 95);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn wrong_dimensions_are_an_error() {
        let root = unique_test_root();
        write_png(&root, "/images/t.png", 10, 10);
        let doc = post("thumbnail: /images/t.png\nthumbnail_blur: data:image/jpeg;base64,x");

        let result = validate(&root, &doc, &sample_config().images);
        assert_eq!(result.issues.len(), 1);
        assert!(result.issues[0].message.contains("10x10"));
        assert!(!result.passed);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn conforming_image_with_blur_is_clean() {
        let root = unique_test_root();
        write_png(&root, "/images/t.png", 16, 16);
        let doc = post("thumbnail: /images/t.png\nthumbnail_blur: data:image/jpeg;base64,x");

        let result = validate(&root, &doc, &sample_config().images);
        assert!(result.passed, "unexpected issues: {:?}", result.issues);
        assert!(result.warnings.is_empty(), "unexpected: {:?}", result.warnings);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_blur_field_warns_when_image_is_declared() {
        let root = unique_test_root();
        write_png(&root, "/images/t.png", 16, 16);
        let doc = post("thumbnail: /images/t.png");

        let result = validate(&root, &doc, &sample_config().images);
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("blur placeholder"));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn patterns_are_skipped() {
        let raw = "---\ntitle: P\n---\nbody\n";
        let doc = Document::parse("p", DocumentKind::Pattern, raw).expect("parse");
        let result = validate(Path::new("/nonexistent"), &doc, &sample_config().images);
        assert!(result.passed);
        assert!(result.warnings.is_empty());
    }
}
