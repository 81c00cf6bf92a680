//! Configuration for the `surplus` command.
//!
//! Values are layered: built-in defaults, then the TOML file, then
//! `SURPLUS_*` environment variables. Command-line flags are applied last by
//! the caller.

use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use surplus_calculator::{AllocationCalculator, AllocationError, DEFAULT_THRESHOLD};
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable naming the configuration file, read by `--config`.
pub const CONFIG_PATH_ENV: &str = "SURPLUS_CONFIG_PATH";
/// File loaded when no configuration path is given.
pub const DEFAULT_CONFIG_PATH: &str = "surplus.toml";

/// Failures while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error(transparent)]
    Calculator(#[from] AllocationError),
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// The `[calculator]` section.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CalculatorConfig {
    /// Revenue in euros below which nothing is allocated.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Reject negative or non-finite revenue instead of passing it through.
    #[serde(default)]
    pub strict: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self { threshold: default_threshold(), strict: false }
    }
}

/// The `[output]` section.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Complete configuration of the `surplus` command.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SurplusConfig {
    #[serde(default)]
    pub calculator: CalculatorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl SurplusConfig {
    /// Loads `path`, or `surplus.toml` when no path is given, then applies the
    /// `SURPLUS_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, Path::new(DEFAULT_CONFIG_PATH), |key| std::env::var(key).ok())
    }

    /// Loads `path`, falling back to `default_path`, then applies the overrides
    /// returned by `lookup`.
    ///
    /// An explicitly requested file (from `--config` or `SURPLUS_CONFIG_PATH`)
    /// must exist. A missing `default_path` falls back to built-in defaults.
    pub fn load_with<F>(path: Option<&Path>, default_path: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if default_path.exists() => Self::from_file(default_path)?,
            None => {
                warn!(
                    path = %default_path.display(),
                    "Configuration file not found. Using default configuration."
                );
                Self::default()
            }
        };

        config.apply_overrides(lookup)
    }

    /// Reads and parses a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        info!(path = %path.display(), "Loaded configuration file");
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `SURPLUS_THRESHOLD`, `SURPLUS_STRICT` and `SURPLUS_OUTPUT_FORMAT`
    /// as returned by `lookup`.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("SURPLUS_THRESHOLD") {
            self.calculator.threshold = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "SURPLUS_THRESHOLD", value: raw.clone() })?;
        }
        if let Some(raw) = lookup("SURPLUS_STRICT") {
            self.calculator.strict = parse_flag(&raw)
                .ok_or(ConfigError::InvalidValue { key: "SURPLUS_STRICT", value: raw.clone() })?;
        }
        if let Some(raw) = lookup("SURPLUS_OUTPUT_FORMAT") {
            self.output.format = OutputFormat::from_str(raw.trim(), true)
                .map_err(|_| ConfigError::InvalidValue { key: "SURPLUS_OUTPUT_FORMAT", value: raw.clone() })?;
        }
        Ok(self)
    }

    /// Builds the calculator. The threshold must be finite and non-negative.
    pub fn calculator(&self) -> Result<AllocationCalculator, ConfigError> {
        Ok(AllocationCalculator::try_new(self.calculator.threshold)?)
    }
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
