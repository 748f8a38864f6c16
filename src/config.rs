//! Configuration for the errstat CLI.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use errstat_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "errstat.toml";

/// Configuration for the errstat CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Tracing filter directive (e.g. "info", "errstat_core=debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Set the log level.
    #[must_use]
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the output format.
    #[must_use]
    pub const fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Apply `ERRSTAT_LOG` and `ERRSTAT_FORMAT` from the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Unparseable values are ignored.
    #[must_use]
    pub fn with_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("ERRSTAT_LOG") {
            self.log_level = level;
        }

        if let Some(format) = lookup("ERRSTAT_FORMAT") {
            self.format = match format.to_lowercase().as_str() {
                "json" => OutputFormat::Json,
                "text" => OutputFormat::Text,
                _ => self.format,
            };
        }

        self
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::file_read_failed(path, e.to_string()))?;

        // JSON by extension, TOML otherwise
        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content).map_err(|e| Error::json_parse_failed(e.to_string()))
        } else {
            toml::from_str(&content).map_err(|e| Error::toml_parse_failed(e.to_string()))
        }
    }

    /// Resolve the effective configuration.
    ///
    /// Reads `explicit` if given, otherwise [`DEFAULT_CONFIG_FILE`] in `dir`
    /// when it exists, otherwise defaults; environment overrides apply last.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be loaded.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let fallback: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None if fallback.is_file() => Self::from_file(&fallback)?,
            None => Self::default(),
        };
        Ok(config.with_env())
    }
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON document.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
