//! Configuration for the location checker.
//!
//! Loads a YAML file with environment variable substitution using
//! `${VAR}` and `${VAR:-default}` syntax.

use anyhow::{Context, Result};
use locations_common::{Axis, AxisBounds, ExtentsConfig};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_FORMATS: [&str; 2] = ["json", "pretty"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationCheckConfig {
    /// Gazetteer JSON file. The command line flag takes precedence.
    #[serde(default)]
    pub gazetteer: Option<PathBuf>,
    #[serde(default)]
    pub extents: ExtentsConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Check new and existing locations concurrently.
    #[serde(default)]
    pub parallel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

/// Load and validate a configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LocationCheckConfig> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;
    parse_config(&content)
}

/// Parse and validate configuration YAML.
pub fn parse_config(content: &str) -> Result<LocationCheckConfig> {
    let expanded = expand_env_vars(content)?;

    let config: LocationCheckConfig =
        serde_yaml::from_str(&expanded).context("Failed to parse config YAML")?;

    validate_config(&config)?;

    Ok(config)
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expand `${VAR}` and `${VAR:-default}`. Unset or empty variables take the
/// default; an unset variable without one is an error.
fn expand_env_vars(content: &str) -> Result<String> {
    if let Some(start) = content.find("${") {
        anyhow::ensure!(
            content[start..].contains('}'),
            "Unclosed variable substitution: {}",
            &content[start..]
        );
    }

    let missing = RefCell::new(Vec::new());
    let expanded = shellexpand::env_with_context(content, |name: &str| {
        match std::env::var(name) {
            Ok(value) if !value.is_empty() => Ok(Some(value)),
            _ => {
                missing.borrow_mut().push(name.to_string());
                Ok::<_, std::env::VarError>(None)
            }
        }
    })
    .context("Failed to expand environment variables")?
    .into_owned();

    for name in missing.into_inner() {
        anyhow::ensure!(
            !expanded.contains(&format!("${{{}}}", name)),
            "Environment variable {} not set",
            name
        );
    }

    Ok(expanded)
}

// ============================================================================
// Validation
// ============================================================================

fn validate_config(config: &LocationCheckConfig) -> Result<()> {
    anyhow::ensure!(
        VALID_LEVELS.contains(&config.logging.level.as_str()),
        "Invalid log level: {}. Must be one of: {:?}",
        config.logging.level,
        VALID_LEVELS
    );
    anyhow::ensure!(
        VALID_FORMATS.contains(&config.logging.format.as_str()),
        "Invalid log format: {}. Must be one of: {:?}",
        config.logging.format,
        VALID_FORMATS
    );

    for axis in Axis::ALL {
        validate_bounds(axis, &config.extents.bounds(axis))?;
    }

    Ok(())
}

fn validate_bounds(axis: Axis, bounds: &AxisBounds) -> Result<()> {
    let (natural_lower, natural_upper) = axis.natural_bounds();

    for (kind, pair) in [("hard", bounds.hard), ("soft", bounds.soft)] {
        if let Some((lower, upper)) = pair {
            anyhow::ensure!(
                lower.is_finite() && upper.is_finite() && lower <= upper,
                "Invalid {} {} bounds ({}, {})",
                axis,
                kind,
                lower,
                upper
            );
            anyhow::ensure!(
                lower >= natural_lower && upper <= natural_upper,
                "{} {} bounds ({}, {}) exceed ({}, {})",
                axis,
                kind,
                lower,
                upper,
                natural_lower,
                natural_upper
            );
        }
    }

    if let (Some(hard), Some(soft)) = (bounds.hard, bounds.soft) {
        anyhow::ensure!(
            soft.0 >= hard.0 && soft.1 <= hard.1,
            "{} soft bounds must lie within the hard bounds",
            axis
        );
    }

    Ok(())
}
