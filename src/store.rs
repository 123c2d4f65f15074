use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::scorer::{LinearClassifier, ScorerHandle};

/// Where model artifacts live. The cache asks two questions of it and nothing else.
pub trait ArtifactStore: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn load(&self, path: &Path) -> anyhow::Result<ScorerHandle>;
}

/// Reads [`LinearClassifier`] artifacts from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsArtifactStore;

impl ArtifactStore for FsArtifactStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn load(&self, path: &Path) -> anyhow::Result<ScorerHandle> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let model = LinearClassifier::from_json(&bytes)?;
        log::debug!(
            "Parsed linear model from {} ({} features)",
            path.display(),
            model.n_features()
        );
        Ok(Arc::new(model))
    }
}
