//! Frontmatter parsing and serialization.
//!
//! Documents are a YAML frontmatter block between `---` delimiters followed by
//! the markdown body. The split keeps the body as a byte-exact slice of the
//! source so fixers can rewrite frontmatter without disturbing content, and
//! unknown keys survive a parse/render round trip through the flattened
//! `extra` map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

const DELIM_OPEN: &str = "---\n";
const DELIM_CLOSE: &str = "\n---\n";
const DELIM_CLOSE_EOF: &str = "\n---";

/// Structured document metadata.
///
/// Posts carry `date`/`excerpt` and the image role fields; patterns carry
/// `chapter`/`number`/`intent`. Fields a document does not use stay `None` and
/// are omitted on render.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_blur: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_blur: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Frontmatter {
    /// Whether the document is visible to public listings.
    ///
    /// An absent `published` key means unpublished: documents opt in to
    /// visibility.
    pub fn is_published(&self) -> bool {
        self.published.unwrap_or(false)
    }
}

/// Parse failures for a document source file.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("missing frontmatter start delimiter")]
    MissingStart,
    #[error("missing frontmatter end delimiter")]
    MissingEnd,
    #[error("invalid frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split raw document text into frontmatter and body.
///
/// The returned body is a slice of `raw` starting immediately after the
/// closing delimiter line, so it is byte-identical to the source.
pub fn split_document(raw: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let Some(rest) = raw.strip_prefix(DELIM_OPEN) else {
        return Err(FrontmatterError::MissingStart);
    };

    let (yaml, body) = if let Some(body) = rest.strip_prefix(DELIM_OPEN) {
        // Empty frontmatter block.
        ("", body)
    } else {
        match rest.find(DELIM_CLOSE) {
            Some(idx) => (&rest[..idx + 1], &rest[idx + DELIM_CLOSE.len()..]),
            None => match rest.strip_suffix(DELIM_CLOSE_EOF) {
                Some(yaml) => (yaml, ""),
                None => return Err(FrontmatterError::MissingEnd),
            },
        }
    };

    let frontmatter = if yaml.trim().is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml)?
    };

    Ok((frontmatter, body))
}

/// Render frontmatter and body back into document source text.
pub fn render_document(
    frontmatter: &Frontmatter,
    body: &str,
) -> Result<String, FrontmatterError> {
    let yaml = serde_yaml::to_string(frontmatter)?;
    Ok(format!("---\n{yaml}---\n{body}"))
}
