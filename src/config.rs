use std::path::PathBuf;

use crate::model_id::ModelId;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Invalid value for field '{field}': {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingRequired { field: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 256 * 1024 * 1024;
pub const DEFAULT_LOAD_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding one `<model>/model` artifact per model.
    pub models_root: PathBuf,
    pub max_payload_size: usize,
    pub load_timeout_secs: u64,
    /// Models loaded before the server starts accepting requests.
    pub preload_models: Vec<String>,
    pub log_level: log::LevelFilter,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            models_root: PathBuf::from("models"),
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
            load_timeout_secs: DEFAULT_LOAD_TIMEOUT_SECS,
            preload_models: Vec::new(),
            log_level: log::LevelFilter::Info,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.host.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "host".to_string(),
            });
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port".to_string(),
                value: self.port.to_string(),
                reason: "must be non-zero".to_string(),
            });
        }
        if self.max_payload_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_payload_size".to_string(),
                value: self.max_payload_size.to_string(),
                reason: "must be non-zero".to_string(),
            });
        }
        if self.load_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "load_timeout_secs".to_string(),
                value: self.load_timeout_secs.to_string(),
                reason: "must be non-zero".to_string(),
            });
        }
        if !self.models_root.is_dir() {
            return Err(ConfigError::ValidationFailed {
                reason: format!(
                    "models root {} is not a directory",
                    self.models_root.display()
                ),
            });
        }
        for name in &self.preload_models {
            if ModelId::parse(name).is_err() {
                return Err(ConfigError::InvalidValue {
                    field: "preload_models".to_string(),
                    value: name.clone(),
                    reason: "model names may only contain [A-Za-z0-9_-]".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn load_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.load_timeout_secs)
    }
}
