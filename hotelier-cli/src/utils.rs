//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management, argument parsing,
//! and output formatting.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use hotelier::database::resolve_database_path;
use hotelier::{Config, ConfigBuilder, Database, DatabaseConfig};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Load the configuration file, falling back to defaults when absent.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref data_dir) = global.data_dir {
        builder = builder.with_file(data_dir.join("config.yaml"));
    }
    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Open the database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init
/// is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_database_path(global.data_dir.as_deref()).map_err(CliError::from)?;

    let autoinit_disabled = global.disable_autoinit || config.disable_autoinit.unwrap_or(false);
    if !db_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let mut db_config = DatabaseConfig::new(db_path);

    if let Some(timeout_seconds) = global.busy_timeout {
        db_config =
            db_config.with_busy_timeout(std::time::Duration::from_secs(timeout_seconds.into()));
    } else if let Some(timeout_seconds) = config.maximum_lock_wait_seconds {
        db_config = db_config.with_busy_timeout(std::time::Duration::from_secs(timeout_seconds));
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Parse a stay timestamp argument.
///
/// Accepts `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM`, or a bare `YYYY-MM-DD`
/// (midnight, which the booking policy then normalizes to the configured
/// check-in/check-out hour).
pub fn parse_datetime_arg(value: &str) -> Result<NaiveDateTime, CliError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M") {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }
    Err(CliError::InvalidArguments(format!(
        "cannot parse '{value}' as a date or datetime (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM)"
    )))
}

/// Parse a calendar date argument (`YYYY-MM-DD`).
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        CliError::InvalidArguments(format!("cannot parse '{value}' as a date (expected YYYY-MM-DD)"))
    })
}

/// Format a datetime for display.
pub fn format_datetime(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// Format an optional datetime for display, with a `-` placeholder.
pub fn format_optional_datetime(value: Option<NaiveDateTime>) -> String {
    value.map_or_else(|| "-".to_string(), format_datetime)
}

/// Format an amount for display.
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}
