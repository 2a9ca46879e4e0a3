//! Structured logging with customer data redaction
//!
//! Reports built by the engine name real customers. Customer names pass
//! through [`PiiRedactor`] before they are logged so they never reach log
//! files in clear text. When correlation hashing is enabled a name is
//! replaced by a short, stable token, which keeps repeated lines about the
//! same customer greppable.
//!
//! # Example
//!
//! ```rust
//! use logger_redacted::{LoggerConfig, PiiRedactor, RedactionConfig};
//!
//! let config = LoggerConfig { level: "debug".into(), ..LoggerConfig::default() };
//! logger_redacted::init_logging(&config).ok();
//!
//! let redactor = PiiRedactor::new(RedactionConfig::from_logger_config(&config));
//! tracing::debug!(customer = %redactor.redact_name("Layla Haddad"), "customer aged");
//! ```

pub mod config;
pub mod redactor;

pub use config::*;
pub use redactor::*;

use error_common::{codes, EngineError, Result};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Fails when a global
/// subscriber is already installed.
///
/// # Errors
///
/// Returns [`EngineError::Config`] for an unparseable level directive or a
/// second initialisation.
pub fn init_logging(config: &LoggerConfig) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            EngineError::config(
                codes::config::INVALID_VALUE,
                format!("invalid log level '{}': {}", config.level, e),
            )
        })?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if config.json {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| {
        EngineError::config(
            codes::config::LOGGER_INIT_FAILED,
            format!("logger already initialised: {e}"),
        )
    })
}
