//! Shared command context passed into command families.

use crate::guidelines::GuidelineStore;
use crate::runtime::artifacts::ArtifactManager;
use crate::runtime::error::{PipelineError, PipelineResult};
use crate::store::ContentStore;
use std::path::{Path, PathBuf};

/// Shared execution context for pipeline command families.
///
/// Bundles the workspace root with the artifact path policy, the memoizing
/// guideline store, and the content store, so commands receive every
/// collaborator by injection instead of reaching for module-level state.
#[derive(Clone, Debug)]
pub struct CommandContext {
    root: PathBuf,
    artifacts: ArtifactManager,
    guidelines: GuidelineStore,
    store: ContentStore,
}

impl CommandContext {
    /// Create a new command context rooted at the current workspace.
    pub fn new() -> PipelineResult<Self> {
        Self::at_root(workspace_root()?)
    }

    /// Create a context rooted at an explicit workspace path.
    pub fn at_root(root: PathBuf) -> PipelineResult<Self> {
        let artifacts = ArtifactManager::new(root.clone());
        let guidelines = GuidelineStore::new(artifacts.guidelines());
        let store = ContentStore::new(&root);
        Ok(Self {
            root,
            artifacts,
            guidelines,
            store,
        })
    }

    /// Workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Shared artifact path policy.
    pub fn artifacts(&self) -> &ArtifactManager {
        &self.artifacts
    }

    /// Shared guideline store.
    pub fn guidelines(&self) -> &GuidelineStore {
        &self.guidelines
    }

    /// Shared content store.
    pub fn store(&self) -> &ContentStore {
        &self.store
    }
}

fn workspace_root() -> PipelineResult<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .ok_or_else(|| PipelineError::environment("content_pipeline lives under crates/"))
}
