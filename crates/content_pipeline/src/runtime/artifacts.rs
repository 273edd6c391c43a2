//! Artifact and collaborator-file path policy.

use crate::runtime::error::{PipelineError, PipelineResult};
use std::fs;
use std::path::{Path, PathBuf};

const CONTENT_REPORT: &str = ".artifacts/content-report.json";
const CONTENT_PLAN: &str = "tools/content/content-plan.json";
const GUIDELINES: &str = "tools/content/guidelines.json";

/// Central path policy for the pipeline.
///
/// Keeps workspace-relative input and output locations consistent across
/// command families. Commands should use it instead of hard-coding ad hoc
/// joins from `ctx.root()`.
#[derive(Clone, Debug)]
pub struct ArtifactManager {
    root: PathBuf,
}

impl ArtifactManager {
    /// Create an artifact manager rooted at the workspace.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Return the workspace root path used for resolution.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a workspace-relative path.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Standard batch-report artifact location.
    pub fn content_report(&self) -> PathBuf {
        self.path(CONTENT_REPORT)
    }

    /// Editorial content-plan file mutated by the calendar fixer.
    pub fn content_plan(&self) -> PathBuf {
        self.path(CONTENT_PLAN)
    }

    /// Guideline ruleset location.
    pub fn guidelines(&self) -> PathBuf {
        self.path(GUIDELINES)
    }

    /// Ensure a directory exists. Idempotent.
    pub fn ensure_dir(&self, path: &Path) -> PipelineResult<()> {
        fs::create_dir_all(path)
            .map_err(|err| PipelineError::io(format!("failed to create {}: {err}", path.display())))
    }
}
