use crate::config::LoggerConfig;
use base64::{engine::general_purpose, Engine as _};
use sha2::{Digest, Sha256};

/// Customer data redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub enabled: bool,
    pub hash_for_correlation: bool,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hash_for_correlation: true,
        }
    }
}

impl RedactionConfig {
    pub fn from_logger_config(config: &LoggerConfig) -> Self {
        Self {
            enabled: config.redaction_enabled,
            hash_for_correlation: config.hash_for_correlation,
        }
    }

    /// Pass-through configuration, used by tests and local debugging
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Redactor for customer identifying text in log messages
#[derive(Debug, Clone)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl Default for PiiRedactor {
    fn default() -> Self {
        Self::new(RedactionConfig::default())
    }
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    /// Redact a customer name in full.
    ///
    /// With correlation hashing the same name always maps to the same
    /// `NAME[..]` token, otherwise only the first character survives.
    pub fn redact_name(&self, name: &str) -> String {
        if !self.config.enabled {
            return name.to_string();
        }
        if self.config.hash_for_correlation {
            return format!("NAME[{}]", self.hash_value(name));
        }
        match name.chars().next() {
            Some(first) => format!("{first}***"),
            None => String::new(),
        }
    }

    fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        general_purpose::STANDARD_NO_PAD.encode(&result[..8]) // first 8 bytes keep tokens short
    }
}
