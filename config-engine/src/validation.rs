// Configuration validation
use crate::error::{ConfigError, Result};

/// Implemented by configuration sections that carry semantic constraints
/// beyond what deserialization enforces.
pub trait ConfigValidator {
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the offending key.
    fn validate(&self) -> Result<()>;
}

pub(crate) fn invalid(key: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::ValidationError(format!("{key}: {reason}"))
}
