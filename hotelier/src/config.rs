//! Configuration loading and schema.
//!
//! Configuration is an optional YAML file (by default
//! `~/.hotelier/config.yaml`); every field has a built-in default so a
//! missing file is not an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::database::default_data_dir;
use crate::error::Result;
use crate::operations::BookingPolicy;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use hotelier::config::Config;
///
/// let config = Config {
///     check_in_hour: Some(15),
///     ..Default::default()
/// };
/// assert_eq!(config.check_in_hour, Some(15));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Hour applied to midnight-only arrivals (default 14).
    pub check_in_hour: Option<u32>,

    /// Hour applied to midnight-only departures (default 12).
    pub check_out_hour: Option<u32>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,
}

impl Config {
    /// Derives the booking policy from the configured hours, falling back
    /// to the 14:00 check-in / 12:00 check-out defaults.
    ///
    /// # Errors
    ///
    /// Returns a validation error when a configured hour is outside
    /// `0..=23`.
    pub fn booking_policy(&self) -> Result<BookingPolicy> {
        let default = BookingPolicy::default();
        BookingPolicy::new(
            self.check_in_hour.unwrap_or_else(|| default.check_in_hour()),
            self.check_out_hour
                .unwrap_or_else(|| default.check_out_hour()),
        )
    }
}

/// Builder assembling a [`Config`] from an optional file.
///
/// # Examples
///
/// ```
/// use hotelier::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new().build().unwrap();
/// assert!(config.check_in_hour.is_none());
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    file: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Creates a builder that reads the default configuration file when it
    /// exists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads configuration from an explicit file instead of the default
    /// location.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the configuration.
    ///
    /// A missing file yields the defaults; a present but malformed file is
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn build(self) -> Result<Config> {
        let path = match self.file {
            Some(path) => path,
            None => match default_data_dir() {
                Ok(dir) => dir.join("config.yaml"),
                // No home directory: fall back to defaults
                Err(_) => return Ok(Config::default()),
            },
        };

        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.check_in_hour, None);
        assert_eq!(config.maximum_lock_wait_seconds, None);
    }

    #[test]
    fn test_default_booking_policy() {
        let policy = Config::default().booking_policy().unwrap();
        assert_eq!(policy.check_in_hour(), 14);
        assert_eq!(policy.check_out_hour(), 12);
    }

    #[test]
    fn test_configured_booking_policy() {
        let config = Config {
            check_in_hour: Some(15),
            check_out_hour: Some(11),
            ..Default::default()
        };
        let policy = config.booking_policy().unwrap();
        assert_eq!(policy.check_in_hour(), 15);
        assert_eq!(policy.check_out_hour(), 11);
    }

    #[test]
    fn test_invalid_hour_rejected() {
        let config = Config {
            check_in_hour: Some(24),
            ..Default::default()
        };
        assert!(config.booking_policy().is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = ConfigBuilder::new()
            .with_file(dir.path().join("absent.yaml"))
            .build()
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_file_is_parsed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "check_in_hour: 15").unwrap();
        writeln!(file, "maximum_lock_wait_seconds: 30").unwrap();

        let config = ConfigBuilder::new().with_file(&path).build().unwrap();
        assert_eq!(config.check_in_hour, Some(15));
        assert_eq!(config.maximum_lock_wait_seconds, Some(30));
        assert_eq!(config.check_out_hour, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "not_a_setting: true").unwrap();

        let result = ConfigBuilder::new().with_file(&path).build();
        assert!(result.is_err());
    }
}
