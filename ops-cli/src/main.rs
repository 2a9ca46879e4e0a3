use clap::Parser;
use colored::*;
use error_common::{log_error, EngineError, Result};
use logger_redacted::{init_logging, LoggerConfig};
use ops_cli::{render, run, Args};
use std::io::Write;
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();

    // Logging comes up before the config is checked so a bad file still gets reported
    let loaded = config_engine::load_config(args.config.as_deref());
    let base_logging = match &loaded {
        Ok(config) => config.logging.clone(),
        Err(_) => LoggerConfig::default(),
    };
    init_logging(&args.logger_config(&base_logging))?;

    let config = loaded
        .map_err(EngineError::from)
        .inspect_err(|e| log_error("load_config", e))?;

    info!("📒 {}", "Receivables aging report".bright_cyan());
    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());

    let report = run(&args, &config).inspect_err(|e| log_error("aging_report", e))?;
    let rendered = render(&report, args.format).inspect_err(|e| log_error("render", e))?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!("✅ Report written to {}", path.display().to_string().bright_green());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    info!(
        customers = report.summary.customers,
        total_balance = %report.summary.total_balance,
        "Aging report complete"
    );

    Ok(())
}
