#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::bail;
use serde_json::Value;
use sgl_predict_rs::{ArtifactStore, FeatureBatch, Scorer, ScorerHandle};

/// Returns the same predictions whatever the input.
pub struct StubScorer {
    predictions: Vec<Value>,
}

impl StubScorer {
    pub fn new(predictions: Vec<Value>) -> Self {
        Self { predictions }
    }
}

impl Scorer for StubScorer {
    fn score(&self, _batch: &FeatureBatch) -> anyhow::Result<Vec<Value>> {
        Ok(self.predictions.clone())
    }
}

/// Fails every batch, like a model fed the wrong number of features.
pub struct FailingScorer;

impl Scorer for FailingScorer {
    fn score(&self, batch: &FeatureBatch) -> anyhow::Result<Vec<Value>> {
        bail!("Feature count mismatch: got {} features", batch.rows()[0].len())
    }
}

/// In-memory store that counts every access. Models are keyed by the name of
/// the directory holding the artifact.
#[derive(Default)]
pub struct CountingStore {
    models: HashMap<String, Vec<Value>>,
    corrupt: HashSet<String>,
    failing_scorers: HashSet<String>,
    load_delay: Duration,
    exists_calls: AtomicUsize,
    load_calls: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, name: &str, predictions: Vec<Value>) -> Self {
        self.models.insert(name.to_string(), predictions);
        self
    }

    pub fn with_corrupt_model(mut self, name: &str) -> Self {
        self.corrupt.insert(name.to_string());
        self
    }

    pub fn with_failing_model(mut self, name: &str) -> Self {
        self.failing_scorers.insert(name.to_string());
        self
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn accesses(&self) -> usize {
        self.exists_calls() + self.load_calls()
    }

    fn model_name(path: &Path) -> String {
        path.parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl ArtifactStore for CountingStore {
    fn exists(&self, path: &Path) -> bool {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        let name = Self::model_name(path);
        self.models.contains_key(&name)
            || self.corrupt.contains(&name)
            || self.failing_scorers.contains(&name)
    }

    fn load(&self, path: &Path) -> anyhow::Result<ScorerHandle> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        if !self.load_delay.is_zero() {
            std::thread::sleep(self.load_delay);
        }
        let name = Self::model_name(path);
        if self.corrupt.contains(&name) {
            bail!("unexpected end of artifact {}", path.display());
        }
        if self.failing_scorers.contains(&name) {
            return Ok(Arc::new(FailingScorer));
        }
        match self.models.get(&name) {
            Some(predictions) => Ok(Arc::new(StubScorer::new(predictions.clone()))),
            None => bail!("no artifact at {}", path.display()),
        }
    }
}

/// Writes `<root>/<name>/model` with the given contents.
pub fn write_artifact(root: &Path, name: &str, contents: &str) {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("model"), contents).unwrap();
}

/// Two features, two classes: class 1 when the first feature is positive.
pub const SIGN_MODEL: &str = r#"{
    "classes": [0, 1],
    "coefficients": [[-1.0, 0.0], [1.0, 0.0]],
    "intercepts": [0.0, 0.0]
}"#;
