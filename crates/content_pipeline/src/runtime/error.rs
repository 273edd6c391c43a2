//! Structured pipeline error types.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

/// Stable error categories for pipeline failures.
///
/// These cover environment and configuration faults only. Content findings are
/// never errors in this sense; they travel as
/// [`ValidationIssue`](content_contract::ValidationIssue) values and are
/// collected, not raised.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PipelineErrorCategory {
    /// Invalid or unreadable configuration (guideline file, plan file).
    Config,
    /// Missing local prerequisites (content directory, workspace root).
    Environment,
    /// Invalid user input or semantically invalid request.
    Validation,
    /// Filesystem or general I/O failure.
    Io,
}

/// Structured pipeline error with contextual metadata.
///
/// Optional `operation`, `target`, and `hint` fields can be attached as the
/// error propagates so failures remain actionable where they are shown.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PipelineError {
    /// High-level error category.
    pub category: PipelineErrorCategory,
    /// Human-readable message.
    pub message: String,
    /// Optional operation name.
    pub operation: Option<String>,
    /// Optional path target.
    pub target: Option<String>,
    /// Optional remediation hint.
    pub hint: Option<String>,
}

/// Convenience result type for pipeline internals.
pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// Create an error with the given category and message.
    pub fn new(category: PipelineErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            operation: None,
            target: None,
            hint: None,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(PipelineErrorCategory::Config, message)
    }

    /// Create an environment error.
    pub fn environment(message: impl Into<String>) -> Self {
        Self::new(PipelineErrorCategory::Environment, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(PipelineErrorCategory::Validation, message)
    }

    /// Create an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(PipelineErrorCategory::Io, message)
    }

    /// Attach an operation label.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Attach a target path.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.target = Some(path.display().to_string());
        self
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(operation) = &self.operation {
            write!(f, " [operation: {operation}]")?;
        }
        if let Some(target) = &self.target {
            write!(f, " [target: {target}]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " [hint: {hint}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for PipelineError {}

impl From<std::io::Error> for PipelineError {
    fn from(value: std::io::Error) -> Self {
        PipelineError::io(value.to_string())
    }
}
