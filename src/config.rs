//! Configuration for the logger
//!
//! Holds the immutable configuration value object, its TOML round-trip, and
//! the one-time configuration slot that gates every logging call.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Logger configuration
///
/// Created once by the producer passed to [`Logger::configure`] and never
/// mutated afterwards. Reconfiguring replaces the whole value.
///
/// [`Logger::configure`]: crate::Logger::configure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// Echo messages to stdout as they are emitted
    #[serde(default = "default_console_logs_enabled")]
    pub console_logs_enabled: bool,

    /// Write formatted lines to the log file
    #[serde(default = "default_log_file_enabled")]
    pub log_file_enabled: bool,

    /// Overwrite an existing `Latest.log` on configuration instead of
    /// rotating it out of the way
    #[serde(default)]
    pub overwrite_log_file: bool,

    /// Directory holding `Latest.log` and rotated files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_console_logs_enabled() -> bool {
    true
}

fn default_log_file_enabled() -> bool {
    true
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("Logs")
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_logs_enabled: default_console_logs_enabled(),
            log_file_enabled: default_log_file_enabled(),
            overwrite_log_file: false,
            log_dir: default_log_dir(),
        }
    }
}

impl LogConfig {
    /// Load configuration from a TOML file, or return the default if the
    /// file does not exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }
}

/// Get a per-user log directory for an application (`~/.<app>/logs`)
///
/// Falls back to `./.<app>/logs` if the home directory cannot be determined.
pub fn user_log_dir(app: &str) -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(format!(".{app}"))
        .join("logs")
}

/// One-time configuration slot
///
/// Starts empty; [`get`] fails until [`set`] has stored a configuration.
/// Being unset is a distinct state from any field value, so logging before
/// configuration is an error rather than a default-off behavior.
///
/// [`get`]: ConfigCell::get
/// [`set`]: ConfigCell::set
#[derive(Debug, Default)]
pub(crate) struct ConfigCell {
    inner: RwLock<Option<LogConfig>>,
}

impl ConfigCell {
    /// Store a configuration, replacing any previous one
    pub(crate) fn set(&self, config: LogConfig) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = Some(config);
        }
    }

    /// Get a copy of the stored configuration
    pub(crate) fn get(&self) -> Result<LogConfig, Error> {
        match self.inner.read() {
            Ok(slot) => (*slot).clone().ok_or(Error::ConfigurationMissing),
            Err(_) => Err(Error::ConfigurationMissing),
        }
    }
}
