//! Shared content model for the blog pipeline.
//!
//! This crate owns the document/frontmatter contract and the validation result
//! types exchanged between the content store, the validators, and the fixers.
//! It deliberately contains no filesystem or rule policy: loading and judging
//! documents is the pipeline crate's job.

mod document;
mod frontmatter;
mod issue;
mod plan;

pub use document::{Document, DocumentKind};
pub use frontmatter::{render_document, split_document, Frontmatter, FrontmatterError};
pub use issue::{IssueCategory, Severity, ValidationIssue, ValidationResult};
pub use plan::{PlanStatus, PlanTopic};
