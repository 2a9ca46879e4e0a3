use error_common::{codes, EngineError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Configuration parsing failed: {0}")]
    ParseError(#[from] figment::Error),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for EngineError {
    fn from(error: ConfigError) -> Self {
        let code = match &error {
            ConfigError::ValidationError(_) => codes::config::INVALID_VALUE,
            _ => codes::config::LOAD_FAILED,
        };
        EngineError::config(code, error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
