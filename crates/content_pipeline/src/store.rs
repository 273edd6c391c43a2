//! Content store over the `content/` directory tree.
//!
//! Posts live in `content/posts`, patterns in `content/patterns`; the file
//! stem is the slug. Malformed documents are a normal case at this layer:
//! they are logged at debug level and reported as "not found" rather than
//! raised, so callers treat `None` as the only error signal for a single
//! document. A missing `content/` directory, by contrast, is fatal.

use crate::runtime::error::{PipelineError, PipelineResult};
use content_contract::{Document, DocumentKind};
use std::fs;
use std::path::{Path, PathBuf};

const POSTS_DIR: &str = "posts";
const PATTERNS_DIR: &str = "patterns";
const DOC_EXTENSION: &str = "md";

/// Filesystem-backed document store.
#[derive(Clone, Debug)]
pub struct ContentStore {
    content_root: PathBuf,
}

impl ContentStore {
    /// Create a store for the workspace rooted at `root`.
    pub fn new(root: &Path) -> Self {
        Self {
            content_root: root.join("content"),
        }
    }

    /// All published documents: posts newest-first, then patterns in
    /// chapter/number order.
    pub fn get_all(&self) -> PipelineResult<Vec<Document>> {
        let (mut posts, mut patterns): (Vec<Document>, Vec<Document>) = self
            .load_corpus()?
            .into_iter()
            .filter(Document::is_published)
            .partition(|d| d.kind == DocumentKind::Post);

        posts.sort_by(|a, b| {
            let a_key = (a.frontmatter.date.as_deref().unwrap_or(""), &a.slug);
            let b_key = (b.frontmatter.date.as_deref().unwrap_or(""), &b.slug);
            b_key.cmp(&a_key)
        });
        patterns.sort_by_key(|d| {
            (
                d.frontmatter.chapter.unwrap_or(u32::MAX),
                d.frontmatter.number.unwrap_or(u32::MAX),
                d.slug.clone(),
            )
        });

        posts.extend(patterns);
        Ok(posts)
    }

    /// Look up one document by slug, published or not.
    pub fn get_by_slug(&self, slug: &str) -> PipelineResult<Option<Document>> {
        self.ensure_content_root()?;
        let Some((path, kind)) = self.source_path(slug) else {
            return Ok(None);
        };
        Ok(self.load_document(&path, kind))
    }

    /// Slugs of every document regardless of published state, sorted.
    pub fn get_all_slugs(&self) -> PipelineResult<Vec<String>> {
        self.ensure_content_root()?;
        let mut slugs = Vec::new();
        for dir in [POSTS_DIR, PATTERNS_DIR] {
            for path in list_markdown(&self.content_root.join(dir))? {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    slugs.push(stem.to_string());
                }
            }
        }
        slugs.sort();
        Ok(slugs)
    }

    /// Every loadable document, published or not, in slug order per kind.
    ///
    /// Validators that need cross-document context (link targets, inbound
    /// links) work over this corpus so unpublished targets stay visible.
    pub fn load_corpus(&self) -> PipelineResult<Vec<Document>> {
        self.ensure_content_root()?;
        let mut documents = Vec::new();
        for (dir, kind) in [
            (POSTS_DIR, DocumentKind::Post),
            (PATTERNS_DIR, DocumentKind::Pattern),
        ] {
            for path in list_markdown(&self.content_root.join(dir))? {
                if let Some(document) = self.load_document(&path, kind) {
                    documents.push(document);
                }
            }
        }
        Ok(documents)
    }

    /// Source file and kind for a slug, if a matching file exists.
    pub fn source_path(&self, slug: &str) -> Option<(PathBuf, DocumentKind)> {
        for (dir, kind) in [
            (POSTS_DIR, DocumentKind::Post),
            (PATTERNS_DIR, DocumentKind::Pattern),
        ] {
            let path = self
                .content_root
                .join(dir)
                .join(format!("{slug}.{DOC_EXTENSION}"));
            if path.is_file() {
                return Some((path, kind));
            }
        }
        None
    }

    fn load_document(&self, path: &Path, kind: DocumentKind) -> Option<Document> {
        let slug = path.file_stem()?.to_str()?.to_string();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                log::debug!("skipping {}: {err}", path.display());
                return None;
            }
        };
        match Document::parse(slug, kind, &raw) {
            Ok(document) => Some(document),
            Err(err) => {
                log::debug!("skipping {}: {err}", path.display());
                None
            }
        }
    }

    fn ensure_content_root(&self) -> PipelineResult<()> {
        if self.content_root.is_dir() {
            Ok(())
        } else {
            Err(
                PipelineError::environment("content directory is missing")
                    .with_path(&self.content_root),
            )
        }
    }
}

fn list_markdown(dir: &Path) -> PipelineResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|err| PipelineError::io(format!("failed to read {}: {err}", dir.display())))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(DOC_EXTENSION))
        })
        .collect();
    paths.sort();
    Ok(paths)
}
