//! Error types for the prediction service
//!
//! Every failure a request can hit is a `PredictError`. The variant decides the
//! HTTP status; the message is what the caller sees in `{"error": ...}`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::io_struct::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Content-Type must be application/json.")]
    UnsupportedMediaType,

    #[error("Invalid JSON payload.")]
    InvalidJson,

    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("Invalid model name.")]
    InvalidModelName,

    #[error("Model '{model}' not found.")]
    ModelNotFound { model: String },

    #[error("Prediction failed: could not load model '{model}': {reason}")]
    LoadFailure { model: String, reason: String },

    #[error("Prediction failed: {0}")]
    ScoringFailure(String),
}

pub type PredictResult<T> = Result<T, PredictError>;

impl PredictError {
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl ResponseError for PredictError {
    fn status_code(&self) -> StatusCode {
        match self {
            PredictError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            PredictError::InvalidJson
            | PredictError::InvalidInput(_)
            | PredictError::InvalidModelName => StatusCode::BAD_REQUEST,
            PredictError::ModelNotFound { .. } => StatusCode::NOT_FOUND,
            PredictError::LoadFailure { .. } | PredictError::ScoringFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
