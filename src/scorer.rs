//! Scoring capability
//!
//! The cache only deals in [`ScorerHandle`]s. Anything that can turn a
//! [`FeatureBatch`] into one prediction per row can be served.

use std::sync::Arc;

use anyhow::{Context, bail, ensure};
use serde::Deserialize;
use serde_json::Value;

use crate::normalize::{FeatureBatch, FeatureVector};

pub trait Scorer: Send + Sync {
    /// One prediction per row, in row order.
    fn score(&self, batch: &FeatureBatch) -> anyhow::Result<Vec<Value>>;
}

pub type ScorerHandle = Arc<dyn Scorer>;

/// Multi-class linear model: predicts the class whose `w·x + b` is largest.
///
/// Serialized form:
/// `{"classes": [...], "coefficients": [[...], ...], "intercepts": [...]}`
#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    classes: Vec<Value>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearClassifier {
    pub fn new(
        classes: Vec<Value>,
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    ) -> anyhow::Result<Self> {
        let model = LinearClassifier {
            classes,
            coefficients,
            intercepts,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn from_json(bytes: &[u8]) -> anyhow::Result<Self> {
        let model: LinearClassifier =
            serde_json::from_slice(bytes).context("malformed linear model artifact")?;
        model.validate()?;
        Ok(model)
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.classes.is_empty(), "model declares no classes");
        ensure!(
            self.coefficients.len() == self.classes.len(),
            "expected {} coefficient rows, found {}",
            self.classes.len(),
            self.coefficients.len()
        );
        ensure!(
            self.intercepts.len() == self.classes.len(),
            "expected {} intercepts, found {}",
            self.classes.len(),
            self.intercepts.len()
        );
        let n_features = self.n_features();
        ensure!(n_features > 0, "coefficient rows are empty");
        if let Some(row) = self.coefficients.iter().position(|w| w.len() != n_features) {
            bail!(
                "coefficient row {} has {} features, expected {}",
                row,
                self.coefficients[row].len(),
                n_features
            );
        }
        Ok(())
    }

    fn predict_row(&self, row: &FeatureVector) -> anyhow::Result<&Value> {
        ensure!(
            row.len() == self.n_features(),
            "Feature count mismatch: model expects {} features, got {}",
            self.n_features(),
            row.len()
        );
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (class, (weights, bias)) in self.coefficients.iter().zip(&self.intercepts).enumerate() {
            let score = weights.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + bias;
            if score > best_score {
                best = class;
                best_score = score;
            }
        }
        Ok(&self.classes[best])
    }
}

impl Scorer for LinearClassifier {
    fn score(&self, batch: &FeatureBatch) -> anyhow::Result<Vec<Value>> {
        batch
            .iter()
            .map(|row| self.predict_row(row).cloned())
            .collect()
    }
}
