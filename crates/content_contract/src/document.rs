//! Document model shared by the store, validators, and fixers.

use crate::frontmatter::{split_document, Frontmatter, FrontmatterError};
use chrono::NaiveDate;
use std::fmt::{self, Display, Formatter};

const WORDS_PER_MINUTE: usize = 200;

/// Content family a document belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DocumentKind {
    Post,
    Pattern,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Post => "post",
            DocumentKind::Pattern => "pattern",
        }
    }

    /// Site route prefix for internal links to this kind.
    pub fn route_prefix(self) -> &'static str {
        match self {
            DocumentKind::Post => "/posts/",
            DocumentKind::Pattern => "/patterns/",
        }
    }
}

impl Display for DocumentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single loaded content unit.
#[derive(Clone, Debug)]
pub struct Document {
    pub slug: String,
    pub kind: DocumentKind,
    pub frontmatter: Frontmatter,
    pub body: String,
    /// Estimated reading time, derived from the body at load time.
    pub reading_minutes: u32,
}

impl Document {
    /// Parse a document from raw source text.
    pub fn parse(
        slug: impl Into<String>,
        kind: DocumentKind,
        raw: &str,
    ) -> Result<Self, FrontmatterError> {
        let (frontmatter, body) = split_document(raw)?;
        Ok(Self {
            slug: slug.into(),
            kind,
            reading_minutes: reading_minutes(body),
            body: body.to_string(),
            frontmatter,
        })
    }

    pub fn is_published(&self) -> bool {
        self.frontmatter.is_published()
    }

    /// Site-absolute route for this document.
    pub fn route(&self) -> String {
        format!("{}{}", self.kind.route_prefix(), self.slug)
    }

    /// Frontmatter date parsed as an ISO calendar date, if present and valid.
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self.frontmatter.date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

fn reading_minutes(body: &str) -> u32 {
    let words = body.split_whitespace().count();
    (words.div_ceil(WORDS_PER_MINUTE).max(1)) as u32
}
