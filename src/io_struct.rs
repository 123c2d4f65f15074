use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PredictResponse {
    pub model: String,
    pub count: usize,
    pub predictions: Vec<Value>,
}

impl PredictResponse {
    pub fn new(model: String, predictions: Vec<Value>) -> Self {
        PredictResponse {
            model,
            count: predictions.len(),
            predictions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        HealthResponse {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoadedModelsResponse {
    pub models: Vec<String>,
}
