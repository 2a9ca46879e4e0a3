//! Layered configuration for the receivables aging engine
//!
//! Values are resolved from, in increasing priority:
//!
//! - built-in defaults ([`EngineConfig::default`])
//! - an optional YAML or TOML file
//! - environment variables prefixed `AGING_`, with `__` separating nested
//!   keys (`AGING_REPORT__INCLUSION_THRESHOLD=0.05`)
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::{ConfigEngine, ConfigSource};
//!
//! let config = ConfigEngine::new()
//!     .add_source(ConfigSource::file("aging.yaml"))
//!     .add_source(ConfigSource::env())
//!     .load()?;
//!
//! println!("threshold: {}", config.report.inclusion_threshold);
//! # Ok::<(), config_engine::ConfigError>(())
//! ```

pub mod engine;
pub mod error;
pub mod providers;
pub mod validation;

pub use engine::*;
pub use error::*;
pub use providers::*;
pub use validation::*;
