//! Blocking prediction pipeline
//!
//! `predict` is the library entry point for callers that embed the cache
//! without the HTTP layer. The server runs the same steps through
//! `AppState::predict`, which moves the load and the scoring onto the
//! blocking pool and puts the load under a timeout. Both share
//! `normalize_features`, `ModelCache::get` and `score_batch`.

use serde_json::Value;

use crate::cache::ModelCache;
use crate::error::{PredictError, PredictResult};
use crate::io_struct::PredictResponse;
use crate::normalize::{FeatureBatch, normalize_features};
use crate::scorer::Scorer;

/// Normalize, resolve, score. Blocking: may hit the disk on a cache miss.
pub fn predict(
    cache: &ModelCache,
    model_name: &str,
    payload: &Value,
) -> PredictResult<PredictResponse> {
    let batch = normalize_features(payload)?;
    let scorer = cache.get(model_name)?;
    let predictions = score_batch(scorer.as_ref(), &batch)?;
    Ok(PredictResponse::new(model_name.to_string(), predictions))
}

pub fn score_batch(scorer: &dyn Scorer, batch: &FeatureBatch) -> PredictResult<Vec<Value>> {
    let predictions = scorer
        .score(batch)
        .map_err(|e| PredictError::ScoringFailure(format!("{:#}", e)))?;
    if predictions.len() != batch.len() {
        return Err(PredictError::ScoringFailure(format!(
            "model returned {} predictions for {} samples",
            predictions.len(),
            batch.len()
        )));
    }
    Ok(predictions)
}
