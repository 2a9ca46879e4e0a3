use crate::codes;
use crate::context::ErrorContext;
use thiserror::Error;

/// Error enum shared by every crate of the engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Ledger documents that break a domain rule
    #[error("Validation error [{code}]: {message}")]
    Validation {
        code: &'static str,
        message: String,
        context: ErrorContext,
    },

    /// Input documents that could not be read or decoded
    #[error("Input error [{code}]: {message}")]
    Input {
        code: &'static str,
        message: String,
        context: ErrorContext,
    },

    /// Configuration that could not be loaded or is invalid
    #[error("Configuration error [{code}]: {message}")]
    Config { code: &'static str, message: String },

    /// File system errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    pub fn validation(code: &'static str, message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            context,
        }
    }

    pub fn input(code: &'static str, message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Input {
            code,
            message: message.into(),
            context,
        }
    }

    pub fn config(code: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
        }
    }

    /// Stable error code for reporting
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { code, .. }
            | Self::Input { code, .. }
            | Self::Config { code, .. } => code,
            Self::Io(_) => codes::input::READ_FAILED,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Input { .. } => "input",
            Self::Config { .. } => "config",
            Self::Io(_) => "io",
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Validation { context, .. } | Self::Input { context, .. } => Some(context),
            _ => None,
        }
    }
}

/// Log an error with its code and context
pub fn log_error(operation: &str, error: &EngineError) {
    let context = error.context().map(ToString::to_string).unwrap_or_default();
    tracing::error!(
        operation = operation,
        error_code = error.code(),
        error_type = error.error_type(),
        context = %context,
        error = %error,
        "Engine operation failed"
    );
}
