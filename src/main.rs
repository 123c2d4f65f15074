use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sgl_predict_rs::config::{DEFAULT_LOAD_TIMEOUT_SECS, DEFAULT_MAX_PAYLOAD_SIZE, ServerConfig};
use sgl_predict_rs::server;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(
        long,
        default_value = "127.0.0.1",
        help = "Host address to bind the server to"
    )]
    host: String,

    #[arg(long, default_value_t = 5000, help = "Port number to listen on")]
    port: u16,

    #[arg(
        long,
        default_value = "models",
        help = "Directory containing one <model_name>/model artifact per model"
    )]
    models_root: PathBuf,

    #[arg(
        long,
        default_value_t = DEFAULT_MAX_PAYLOAD_SIZE,
        help = "Maximum request body size in bytes"
    )]
    max_payload_size: usize,

    #[arg(
        long,
        default_value_t = DEFAULT_LOAD_TIMEOUT_SECS,
        help = "Seconds to wait for a model to load before failing the request"
    )]
    load_timeout_secs: u64,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Comma-separated list of models to load before serving"
    )]
    preload_models: Vec<String>,

    #[arg(long, default_value_t = LogLevel::Info, value_enum, help = "Log level")]
    log_level: LogLevel,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            models_root: self.models_root,
            max_payload_size: self.max_payload_size,
            load_timeout_secs: self.load_timeout_secs,
            preload_models: self.preload_models,
            log_level: self.log_level.into(),
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    server::startup(args.into_config()).await
}
