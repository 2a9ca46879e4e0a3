use crate::error::Result;
use crate::providers::ConfigSource;
use crate::validation::{invalid, ConfigValidator};
use figment::providers::Serialized;
use figment::Figment;
use logger_redacted::LoggerConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest rounding scale accepted for report balances
pub const MAX_ROUNDING_DP: u32 = 10;

/// Aging report settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Customers are listed only when their balance is strictly above this
    pub inclusion_threshold: Decimal,
    /// Decimal places the current balance is rounded to
    pub rounding_dp: u32,
    /// Voucher entity type that identifies a customer counterpart
    pub customer_entity_type: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            inclusion_threshold: Decimal::new(1, 2),
            rounding_dp: 2,
            customer_entity_type: "customer".to_string(),
        }
    }
}

impl ConfigValidator for ReportConfig {
    fn validate(&self) -> Result<()> {
        if self.inclusion_threshold.is_sign_negative() {
            return Err(invalid(
                "report.inclusion_threshold",
                format!("must not be negative, got {}", self.inclusion_threshold),
            ));
        }
        if self.rounding_dp > MAX_ROUNDING_DP {
            return Err(invalid(
                "report.rounding_dp",
                format!("must be at most {MAX_ROUNDING_DP}, got {}", self.rounding_dp),
            ));
        }
        if self.customer_entity_type.trim().is_empty() {
            return Err(invalid("report.customer_entity_type", "must not be empty"));
        }
        Ok(())
    }
}

impl ConfigValidator for LoggerConfig {
    fn validate(&self) -> Result<()> {
        if self.level.trim().is_empty() {
            return Err(invalid("logging.level", "must not be empty"));
        }
        Ok(())
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub report: ReportConfig,
    pub logging: LoggerConfig,
}

impl ConfigValidator for EngineConfig {
    fn validate(&self) -> Result<()> {
        self.report.validate()?;
        self.logging.validate()
    }
}

/// Builder that merges configuration sources over the defaults
#[derive(Debug, Clone, Default)]
pub struct ConfigEngine {
    sources: Vec<ConfigSource>,
}

impl ConfigEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source; later sources override earlier ones.
    #[must_use]
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Resolve and validate the configuration.
    ///
    /// # Errors
    ///
    /// Fails when a source is missing or unreadable, when a value has the
    /// wrong type, or when validation rejects the merged result.
    pub fn load(&self) -> Result<EngineConfig> {
        let mut figment = Figment::from(Serialized::defaults(EngineConfig::default()));
        for source in &self.sources {
            figment = source.merge_into(figment)?;
        }

        let config: EngineConfig = figment.extract()?;
        config.validate()?;

        tracing::debug!(
            sources = self.sources.len(),
            inclusion_threshold = %config.report.inclusion_threshold,
            rounding_dp = config.report.rounding_dp,
            "Configuration loaded"
        );
        Ok(config)
    }
}

/// Defaults, then the optional file, then the environment.
///
/// # Errors
///
/// See [`ConfigEngine::load`].
pub fn load_config(path: Option<&std::path::Path>) -> Result<EngineConfig> {
    let mut engine = ConfigEngine::new();
    if let Some(path) = path {
        engine = engine.add_source(ConfigSource::file(path));
    }
    engine.add_source(ConfigSource::env()).load()
}
