//! Blur-placeholder injection.
//!
//! Derives a tiny, heavily blurred base64 preview for each declared image
//! that lacks one and writes it into the document's frontmatter. The source
//! file is rewritten only when a field actually changed, so re-running is a
//! no-op; the body is carried through byte-for-byte.

use crate::assets;
use crate::runtime::error::{PipelineError, PipelineResult};
use crate::store::ContentStore;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use content_contract::{render_document, split_document};
use image::ImageFormat;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Longest edge of the generated preview, in pixels.
const PLACEHOLDER_BOUND: u32 = 16;
const PLACEHOLDER_SIGMA: f32 = 1.5;

/// Outcome of one blur-injection run over one document.
#[derive(Clone, Debug, Default)]
pub struct BlurOutcome {
    /// Whether the source file was rewritten.
    pub updated: bool,
    /// Frontmatter fields that received a placeholder.
    pub fields: Vec<String>,
    /// Per-field failures; these never abort the other field.
    pub warnings: Vec<String>,
}

/// Inject missing blur placeholders for a document's image roles.
pub fn inject_blur_placeholders(
    root: &Path,
    store: &ContentStore,
    slug: &str,
) -> PipelineResult<BlurOutcome> {
    let Some((path, _)) = store.source_path(slug) else {
        return Err(PipelineError::validation(format!("document `{slug}` not found")));
    };

    let raw = fs::read_to_string(&path)
        .map_err(|err| PipelineError::io(format!("failed to read {}: {err}", path.display())))?;
    let (mut frontmatter, body) = split_document(&raw).map_err(|err| {
        PipelineError::validation(format!("cannot fix `{slug}`: {err}")).with_path(&path)
    })?;

    let mut outcome = BlurOutcome::default();
    let roles: [(&str, Option<String>, &mut Option<String>); 2] = [
        (
            "thumbnail_blur",
            frontmatter.thumbnail.clone(),
            &mut frontmatter.thumbnail_blur,
        ),
        (
            "hero_blur",
            frontmatter.hero_image.clone(),
            &mut frontmatter.hero_blur,
        ),
    ];

    for (field, source, blur_slot) in roles {
        let Some(source) = source else {
            continue;
        };
        if blur_slot.is_some() {
            continue;
        }
        match placeholder_for(root, &source) {
            Ok(placeholder) => {
                *blur_slot = Some(placeholder);
                outcome.fields.push(field.to_string());
            }
            Err(err) => outcome.warnings.push(format!("{field}: {err}")),
        }
    }

    if outcome.fields.is_empty() {
        return Ok(outcome);
    }

    let rendered = render_document(&frontmatter, body).map_err(|err| {
        PipelineError::validation(format!("cannot rewrite `{slug}`: {err}")).with_path(&path)
    })?;
    fs::write(&path, rendered)
        .map_err(|err| PipelineError::io(format!("failed to write {}: {err}", path.display())))?;
    outcome.updated = true;
    Ok(outcome)
}

fn placeholder_for(root: &Path, source: &str) -> Result<String, String> {
    let bytes = assets::load_asset_bytes(root, source)?;
    make_placeholder(&bytes)
}

/// Downscale, blur, and encode image bytes as a JPEG data URL.
pub fn make_placeholder(bytes: &[u8]) -> Result<String, String> {
    let decoded =
        image::load_from_memory(bytes).map_err(|err| format!("failed to decode image: {err}"))?;
    let preview = decoded
        .thumbnail(PLACEHOLDER_BOUND, PLACEHOLDER_BOUND)
        .blur(PLACEHOLDER_SIGMA)
        .to_rgb8();

    let mut encoded = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(preview)
        .write_to(&mut encoded, ImageFormat::Jpeg)
        .map_err(|err| format!("failed to encode preview: {err}"))?;

    Ok(format!(
        "data:image/jpeg;base64,{}",
        STANDARD.encode(encoded.into_inner())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_test_root() -> PathBuf {
        std::env::temp_dir().join(format!(
            "content-blur-test-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ))
    }

    fn write_doc(root: &Path, slug: &str, raw: &str) -> PathBuf {
        let dir = root.join("content/posts");
        fs::create_dir_all(&dir).expect("create posts dir");
        let path = dir.join(format!("{slug}.md"));
        fs::write(&path, raw).expect("write doc");
        path
    }

    fn write_png(root: &Path, rel: &str) {
        let path = assets::resolve_asset_path(root, rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("create image dir");
        RgbImage::new(32, 32)
            .save_with_format(&path, ImageFormat::Png)
            .expect("write png");
    }

    const DOC: &str = "---\ntitle: T\nthumbnail: /images/t.png\nextra_key: preserved\n---\nBody stays exactly as written.\n\nEven this line.\n";

    #[test]
    fn injects_placeholder_and_preserves_body() {
        let root = unique_test_root();
        let path = write_doc(&root, "a", DOC);
        write_png(&root, "/images/t.png");
        let store = ContentStore::new(&root);

        let outcome = inject_blur_placeholders(&root, &store, "a").expect("fix");
        assert!(outcome.updated);
        assert_eq!(outcome.fields, vec!["thumbnail_blur"]);
        assert!(outcome.warnings.is_empty());

        let rewritten = fs::read_to_string(&path).expect("read back");
        let (frontmatter, body) = split_document(&rewritten).expect("re-split");
        assert!(frontmatter
            .thumbnail_blur
            .as_deref()
            .is_some_and(|b| b.starts_with("data:image/jpeg;base64,")));
        assert!(frontmatter.extra.contains_key("extra_key"));
        assert_eq!(body, "Body stays exactly as written.\n\nEven this line.\n");

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn second_run_is_a_no_op() {
        let root = unique_test_root();
        write_doc(&root, "a", DOC);
        write_png(&root, "/images/t.png");
        let store = ContentStore::new(&root);

        let first = inject_blur_placeholders(&root, &store, "a").expect("first run");
        assert!(first.updated);
        let second = inject_blur_placeholders(&root, &store, "a").expect("second run");
        assert!(!second.updated);
        assert!(second.fields.is_empty());

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_image_is_a_warning_and_skips_the_write() {
        let root = unique_test_root();
        let path = write_doc(&root, "a", DOC);
        let store = ContentStore::new(&root);
        let before = fs::read_to_string(&path).expect("read");

        let outcome = inject_blur_placeholders(&root, &store, "a").expect("fix");
        assert!(!outcome.updated);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].starts_with("thumbnail_blur:"));
        assert_eq!(fs::read_to_string(&path).expect("read"), before);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn one_bad_role_does_not_block_the_other() {
        let root = unique_test_root();
        write_doc(
            &root,
            "a",
            "---\ntitle: T\nthumbnail: /images/missing.png\nhero_image: /images/h.png\n---\nbody\n",
        );
        write_png(&root, "/images/h.png");
        let store = ContentStore::new(&root);

        let outcome = inject_blur_placeholders(&root, &store, "a").expect("fix");
        assert!(outcome.updated);
        assert_eq!(outcome.fields, vec!["hero_blur"]);
        assert_eq!(outcome.warnings.len(), 1);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn unknown_slug_is_an_error() {
        let root = unique_test_root();
        fs::create_dir_all(root.join("content/posts")).expect("create dirs");
        let store = ContentStore::new(&root);
        assert!(inject_blur_placeholders(&root, &store, "ghost").is_err());
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn placeholder_is_a_jpeg_data_url() {
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(RgbImage::new(64, 48))
            .write_to(&mut bytes, ImageFormat::Png)
            .expect("encode fixture");
        let placeholder = make_placeholder(&bytes.into_inner()).expect("placeholder");
        assert!(placeholder.starts_with("data:image/jpeg;base64,"));
        // Tiny by construction: a 16px preview stays well under 2 KB encoded.
        assert!(placeholder.len() < 2048);
    }
}
