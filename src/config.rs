//! Application configuration management.
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config PATH`, or `config.toml` in the platform config dir)
//! 3. `FGROUPS_*` environment variables (e.g. `FGROUPS_MAX_NAME_LEN=4095`)
//! 4. CLI flags, via [`Config::merge_cli`]
//!
//! # Example
//!
//! ```toml
//! max_fingerprint_len = 128
//! max_name_len = 4095
//! output = "json"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::{Cli, OutputFormat};
use crate::scanner::{FieldLimits, DEFAULT_MAX_FINGERPRINT_LEN, DEFAULT_MAX_NAME_LEN};

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "FGROUPS_";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// A layer could not be parsed or had the wrong shape.
    #[error("Invalid configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A field limit was zero.
    #[error("Invalid value for {key}: {value} (must be at least 1)")]
    InvalidLimit {
        /// Offending key
        key: &'static str,
        /// Offending value
        value: usize,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Longest accepted fingerprint in bytes.
    pub max_fingerprint_len: usize,
    /// Longest stored name in bytes.
    pub max_name_len: usize,
    /// Report format.
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_fingerprint_len: DEFAULT_MAX_FINGERPRINT_LEN,
            max_name_len: DEFAULT_MAX_NAME_LEN,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration for a run.
    ///
    /// With `explicit` set, that file must exist. Otherwise the default
    /// platform path is used if it exists, and skipped silently if not.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit file is missing, a layer
    /// cannot be parsed, or a limit is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::load_from_path(path)
            }
            None => match Self::default_path() {
                Some(path) => Self::load_from_path(path),
                None => Self::extract(Self::base()),
            },
        }
    }

    /// Load configuration from a specific TOML file plus environment.
    ///
    /// A missing file contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a layer cannot be parsed or a limit is
    /// invalid.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        Self::extract(Self::base().merge(Toml::file(path)))
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI flags on top of the loaded layers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLimit`] if a flag sets a limit to zero.
    pub fn merge_cli(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        if let Some(len) = cli.max_fingerprint_len {
            self.max_fingerprint_len = len;
        }
        if let Some(len) = cli.max_name_len {
            self.max_name_len = len;
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        self.validate()
    }

    /// Check that both limits are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLimit`] for a zero limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_fingerprint_len == 0 {
            return Err(ConfigError::InvalidLimit {
                key: "max_fingerprint_len",
                value: self.max_fingerprint_len,
            });
        }
        if self.max_name_len == 0 {
            return Err(ConfigError::InvalidLimit {
                key: "max_name_len",
                value: self.max_name_len,
            });
        }
        Ok(())
    }

    /// Field limits for the scanner.
    #[must_use]
    pub fn limits(&self) -> FieldLimits {
        FieldLimits::new(self.max_fingerprint_len, self.max_name_len)
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "fgroups", "fgroups")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
