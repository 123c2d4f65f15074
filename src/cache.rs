//! Process-wide model cache
//!
//! Resolves a model name to a loaded [`ScorerHandle`], loading it from the
//! backing store the first time it is asked for and never again.
//!
//! Hits are served straight from a `DashMap` and never wait on a load in
//! progress for another model. Misses go through a per-model gate so that
//! concurrent first requests for the same model trigger a single load; the
//! callers queued behind the gate pick up the winner's handle.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::error::{PredictError, PredictResult};
use crate::model_id::ModelId;
use crate::scorer::ScorerHandle;
use crate::store::{ArtifactStore, FsArtifactStore};

/// File name of the serialized model inside each model directory.
pub const ARTIFACT_FILE_NAME: &str = "model";

pub struct ModelCache {
    root: PathBuf,
    store: Arc<dyn ArtifactStore>,
    loaded: DashMap<ModelId, ScorerHandle>,
    gates: DashMap<ModelId, Arc<Mutex<()>>>,
}

impl ModelCache {
    pub fn new(root: impl Into<PathBuf>, store: Arc<dyn ArtifactStore>) -> Self {
        ModelCache {
            root: root.into(),
            store,
            loaded: DashMap::new(),
            gates: DashMap::new(),
        }
    }

    pub fn with_fs_store(root: impl Into<PathBuf>) -> Self {
        Self::new(root, Arc::new(FsArtifactStore))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<model>/model`
    pub fn artifact_path(&self, model_id: &ModelId) -> PathBuf {
        self.root.join(model_id.as_str()).join(ARTIFACT_FILE_NAME)
    }

    pub fn get(&self, model_name: &str) -> PredictResult<ScorerHandle> {
        // The name becomes a path component; it is checked before anything touches the store.
        let model_id = ModelId::parse(model_name)?;

        if let Some(scorer) = self.loaded.get(&model_id) {
            return Ok(Arc::clone(scorer.value()));
        }

        let gate = Arc::clone(self.gates.entry(model_id.clone()).or_default().value());
        let result = {
            let _guard = gate.lock();
            self.load_gated(&model_id)
        };
        // Map plus our clone: nobody else is queued on this gate.
        self.gates
            .remove_if(&model_id, |_, gate| Arc::strong_count(gate) == 2);
        result
    }

    /// Must be called with the model's gate held.
    fn load_gated(&self, model_id: &ModelId) -> PredictResult<ScorerHandle> {
        if let Some(scorer) = self.loaded.get(model_id) {
            return Ok(Arc::clone(scorer.value()));
        }

        let path = self.artifact_path(model_id);
        if !self.store.exists(&path) {
            log::warn!("Model '{}' not found at {}", model_id, path.display());
            return Err(PredictError::ModelNotFound {
                model: model_id.to_string(),
            });
        }

        let started = Instant::now();
        let scorer = self.store.load(&path).map_err(|e| {
            log::error!("Failed to load model '{}' from {}: {:#}", model_id, path.display(), e);
            PredictError::LoadFailure {
                model: model_id.to_string(),
                reason: self.caller_reason(&e, &path),
            }
        })?;
        log::info!(
            "Loaded model '{}' from {} in {:?}",
            model_id,
            path.display(),
            started.elapsed()
        );

        self.loaded.insert(model_id.clone(), Arc::clone(&scorer));
        Ok(scorer)
    }

    /// The root cause only, with server paths removed. The full chain goes to the log.
    fn caller_reason(&self, err: &anyhow::Error, path: &Path) -> String {
        let mut reason = err.root_cause().to_string();
        reason = reason.replace(&path.display().to_string(), "<artifact>");
        if self.root.is_absolute() {
            reason = reason.replace(&self.root.display().to_string(), "<models>");
        }
        reason
    }

    /// Loads each named model up front, stopping at the first failure.
    pub fn preload(&self, model_names: &[String]) -> PredictResult<()> {
        for name in model_names {
            self.get(name)?;
        }
        Ok(())
    }

    /// Validates the name and returns the handle only if it is already loaded.
    pub fn get_if_loaded(&self, model_name: &str) -> PredictResult<Option<ScorerHandle>> {
        let model_id = ModelId::parse(model_name)?;
        Ok(self
            .loaded
            .get(&model_id)
            .map(|scorer| Arc::clone(scorer.value())))
    }

    /// Names of every model loaded so far, sorted.
    pub fn loaded_models(&self) -> Vec<String> {
        let mut models: Vec<String> = self
            .loaded
            .iter()
            .map(|entry| entry.key().to_string())
            .collect();
        models.sort();
        models
    }

    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }
}

impl std::fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCache")
            .field("root", &self.root)
            .field("loaded", &self.loaded_models())
            .finish()
    }
}
