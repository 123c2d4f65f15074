use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use anyhow::Context;
use serde_json::Value;

use crate::cache::ModelCache;
use crate::config::ServerConfig;
use crate::error::{PredictError, PredictResult};
use crate::io_struct::PredictResponse;
use crate::normalize::normalize_features;
use crate::scorer::ScorerHandle;
use crate::service::score_batch;

#[derive(Debug, Clone)]
pub struct AppState {
    pub cache: Arc<ModelCache>,
    pub load_timeout: Duration,
}

impl AppState {
    pub fn new(cache: ModelCache, load_timeout: Duration) -> Self {
        Self {
            cache: Arc::new(cache),
            load_timeout,
        }
    }

    /// Validates the config, builds a filesystem-backed cache and loads any
    /// models requested for preloading.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let cache = ModelCache::with_fs_store(config.models_root.clone());
        cache
            .preload(&config.preload_models)
            .context("failed to preload models")?;
        Ok(Self::new(cache, config.load_timeout()))
    }

    /// Cache hits return immediately; misses load on the blocking pool under
    /// the configured timeout.
    pub async fn resolve_model(&self, model_name: &str) -> PredictResult<ScorerHandle> {
        if let Some(scorer) = self.cache.get_if_loaded(model_name)? {
            return Ok(scorer);
        }

        let cache = Arc::clone(&self.cache);
        let name = model_name.to_string();
        let task = web::block(move || cache.get(&name));
        match tokio::time::timeout(self.load_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(PredictError::LoadFailure {
                model: model_name.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => {
                log::error!(
                    "Loading model '{}' exceeded {:?}",
                    model_name,
                    self.load_timeout
                );
                Err(PredictError::LoadFailure {
                    model: model_name.to_string(),
                    reason: format!("timed out after {:?}", self.load_timeout),
                })
            }
        }
    }

    pub async fn predict(&self, model_name: &str, payload: &Value) -> PredictResult<PredictResponse> {
        let batch = normalize_features(payload)?;
        let scorer = self.resolve_model(model_name).await?;
        let predictions = web::block(move || score_batch(scorer.as_ref(), &batch))
            .await
            .map_err(|e| PredictError::ScoringFailure(e.to_string()))??;
        Ok(PredictResponse::new(model_name.to_string(), predictions))
    }
}
