use crate::app_state::AppState;
use crate::config::ServerConfig;
use crate::error::{PredictError, PredictResult};
use crate::io_struct::{HealthResponse, LoadedModelsResponse};
use crate::logging;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, HttpServer, get, mime, post, web};
use bytes::Bytes;
use serde_json::Value;

#[get("/health")]
pub async fn health(_req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::ok())
}

#[get("/loaded_models")]
pub async fn loaded_models(app_state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(LoadedModelsResponse {
        models: app_state.cache.loaded_models(),
    })
}

#[post("/predict/{model_name}")]
pub async fn predict(
    req: HttpRequest,
    path: web::Path<String>,
    body: Bytes,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, PredictError> {
    let model_name = path.into_inner();
    let result = match parse_json_body(&req, &body) {
        Ok(payload) => app_state.predict(&model_name, &payload).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            if e.is_client_error() {
                log::warn!("Rejected prediction request for '{}': {}", model_name, e);
            } else {
                log::error!("Prediction for '{}' failed: {}", model_name, e);
            }
            Err(e)
        }
    }
}

/// `application/json` and `application/*+json` are accepted. A body of
/// `null` is treated the same as one that does not parse.
fn parse_json_body(req: &HttpRequest, body: &Bytes) -> PredictResult<Value> {
    let is_json = match req.mime_type() {
        Ok(Some(content_type)) => {
            content_type.type_() == mime::APPLICATION
                && (content_type.subtype() == mime::JSON
                    || content_type.suffix() == Some(mime::JSON))
        }
        _ => false,
    };
    if !is_json {
        return Err(PredictError::UnsupportedMediaType);
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) | Err(_) => Err(PredictError::InvalidJson),
        Ok(payload) => Ok(payload),
    }
}

/// Routes shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(loaded_models).service(predict);
}

pub async fn startup(config: ServerConfig) -> anyhow::Result<()> {
    logging::init_logging(config.log_level);

    log::info!("Models root: {}", config.models_root.display());
    log::info!("Load timeout: {:?}", config.load_timeout());
    log::info!(
        "Max payload size: {} MB",
        config.max_payload_size / (1024 * 1024)
    );
    if !config.preload_models.is_empty() {
        log::info!("Preloading models: {:?}", config.preload_models);
    }

    let app_state = AppState::from_config(&config)?;
    log::info!("Loaded models: {:?}", app_state.cache.loaded_models());
    let app_state = web::Data::new(app_state);
    let max_payload_size = config.max_payload_size;

    log::info!("Starting server at {}:{}", config.host, config.port);
    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(app_state.clone())
            .app_data(web::PayloadConfig::new(max_payload_size))
            .configure(configure)
    })
    .bind((config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
