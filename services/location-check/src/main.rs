//! Locations sheet checker.
//!
//! Validates a locations sheet (a JSON grid of cells) against a gazetteer,
//! prints a JSON report and exits with 0 when the sheet is valid, 1 when it
//! has data errors and 2 when it cannot be checked at all.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use location_check::config::{load_config, LocationCheckConfig, LoggingConfig};
use location_check::{check_sheet, CheckStatus};

#[derive(Parser, Debug)]
#[command(name = "location-check")]
#[command(about = "Validate a locations sheet against a gazetteer")]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "LOCATION_CHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Gazetteer JSON file (overrides the config file)
    #[arg(short, long, env = "LOCATION_CHECK_GAZETTEER")]
    gazetteer: Option<PathBuf>,

    /// Locations sheet as a JSON array of rows
    #[arg(short, long)]
    sheet: PathBuf,

    /// Log level (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    match run(args) {
        Ok(status) => status.exit_code(),
        Err(e) => {
            error!(error = %format!("{:#}", e), "Location check failed");
            eprintln!("Error: {:#}", e);
            CheckStatus::Rejected.exit_code()
        }
    }
}

fn run(args: Args) -> Result<CheckStatus> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => LocationCheckConfig::default(),
    };

    init_tracing(&config.logging, args.log_level.as_deref())?;
    info!(config = ?args.config, "Starting location check");

    let gazetteer = args
        .gazetteer
        .clone()
        .or_else(|| config.gazetteer.clone())
        .context("No gazetteer given: use --gazetteer or set it in the config file")?;

    let report = check_sheet(&config, &gazetteer, &args.sheet)?;
    info!(
        status = ?report.status,
        errors = report.error_count,
        warnings = report.warning_count,
        locations = report.locations.len(),
        "Location check complete"
    );

    let json = report.to_json().context("Failed to serialize report")?;
    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write report to {:?}", path))?,
        None => println!("{}", json),
    }

    Ok(report.status)
}

fn init_tracing(logging: &LoggingConfig, level_override: Option<&str>) -> Result<()> {
    let level = level_override.unwrap_or(&logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if logging.format == "pretty" {
        builder.pretty().try_init()
    } else {
        builder.json().try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}
