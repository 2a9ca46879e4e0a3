//! Command line front end for the receivables aging engine
//!
//! The `aging-report` binary reads a ledger snapshot exported from the back
//! office, ages every customer's outstanding balance and prints the report
//! as JSON or YAML.
//!
//! ```bash
//! # Today's aging, pretty JSON on stdout
//! aging-report --input ledger.json
//!
//! # Month-end aging for customers matching "noor", as YAML
//! aging-report --input ledger.json --as-of 2024-06-30 --search noor --format yaml
//!
//! # Site configuration and structured logs
//! AGING_REPORT__INCLUSION_THRESHOLD=1 aging-report -i ledger.json -c aging.yaml --json-logs
//! ```

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use config_engine::EngineConfig;
use error_common::{codes, EngineError, ErrorContext, Result};
use logger_redacted::{LoggerConfig, PiiRedactor, RedactionConfig};
use receivables_service::{AgingReport, JsonFileSource, ReceivablesService};
use std::fmt;
use std::path::PathBuf;

/// Receivables aging report
#[derive(Parser, Debug, Clone)]
#[command(name = "aging-report")]
#[command(about = "Age customer receivables into 0-30, 31-60, 61-90 and 90+ day buckets")]
#[command(version)]
pub struct Args {
    /// Ledger snapshot (JSON)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Reference date for aging, defaults to today
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub as_of: Option<NaiveDate>,

    /// Only customers whose name contains this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Configuration file (YAML or TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl Args {
    /// Logging settings from the configuration file, with command line overrides
    pub fn logger_config(&self, base: &LoggerConfig) -> LoggerConfig {
        let mut config = base.clone();
        if self.verbose {
            config.level = "debug".to_string();
        }
        if self.json_logs {
            config.json = true;
        }
        config
    }

    pub fn as_of_or_today(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

/// Serialize a report in the requested format
pub fn render(report: &AgingReport, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(report).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yaml::to_string(report).map_err(|e| e.to_string()),
    };

    rendered.map_err(|message| {
        EngineError::input(
            codes::input::ENCODE_FAILED,
            format!("Failed to encode report as {format}: {message}"),
            ErrorContext::new(),
        )
    })
}

/// Build the aging report described by `args`
pub fn run(args: &Args, config: &EngineConfig) -> Result<AgingReport> {
    let redactor = PiiRedactor::new(RedactionConfig::from_logger_config(&config.logging));
    let service = ReceivablesService::new(JsonFileSource::new(&args.input), config.report.clone())
        .with_redactor(redactor);

    let mut options = service.options(args.as_of_or_today());
    if let Some(search) = &args.search {
        options = options.with_search(search.clone());
    }

    tracing::info!(
        input = %args.input.display(),
        as_of = %options.as_of,
        search = options.search.as_deref().unwrap_or(""),
        "Building aging report"
    );

    Ok(service.aging_report(&options)?)
}
