//! Log file path resolution and rotation
//!
//! Resolves the active log file once per configuration, rotating any
//! previous file out of the way and writing the creation-timestamp header.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, Utc};

use crate::config::LogConfig;
use crate::error::Error;

/// Fixed name of the active log file within the log directory
pub(crate) const LATEST_LOG_NAME: &str = "Latest.log";

/// Resolve the active log file for `config`
///
/// Creates the log directory, rotates an existing `Latest.log` unless the
/// configuration asks to overwrite it, and writes the header line when file
/// logging is enabled. Blocking on purpose: the header must be on disk
/// before any emit can race ahead.
pub(crate) fn resolve_log_file(config: &LogConfig) -> Result<PathBuf, Error> {
    fs::create_dir_all(&config.log_dir).map_err(|source| Error::LogFileInit {
        path: config.log_dir.clone(),
        source,
    })?;

    let log_path = config.log_dir.join(LATEST_LOG_NAME);

    if log_path.exists() && !config.overwrite_log_file {
        rotate_existing(&log_path, &config.log_dir);
    }

    if !config.log_file_enabled {
        // Path is recorded but the file is left untouched.
        return Ok(log_path);
    }

    let header = format!("{{ {} }}\n", Utc::now().timestamp_millis());
    fs::write(&log_path, header).map_err(|source| Error::LogFileInit {
        path: log_path.clone(),
        source,
    })?;

    Ok(log_path)
}

/// Rename an existing log file to `<token>.log` in the same directory
///
/// The token comes from the file's own header timestamp, falling back to
/// the rotation moment. Read or rename failures are reported to stderr and
/// swallowed; the caller then proceeds as if overwriting.
fn rotate_existing(log_path: &Path, log_dir: &Path) {
    let token = match fs::read_to_string(log_path) {
        Ok(content) => extract_header_token(&content).unwrap_or_else(fallback_token),
        Err(e) => {
            eprintln!("failed to read previous log file for rotation: {e}");
            return;
        }
    };

    let rotated = log_dir.join(format!("{token}.log"));
    if let Err(e) = fs::rename(log_path, &rotated) {
        eprintln!(
            "failed to rotate previous log file to {}: {e}",
            rotated.display()
        );
    }
}

/// Extract the timestamp token from between the first `{` `}` pair of the
/// header line, with spaces stripped
///
/// An empty token counts as absent.
fn extract_header_token(content: &str) -> Option<String> {
    let first_line = content.lines().next()?;
    let open = first_line.find('{')?;
    let rest = &first_line[open + 1..];
    let close = rest.find('}')?;

    let token = rest[..close].replace(' ', "");
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Sortable wall-clock name used when the old header carries no token
fn fallback_token() -> String {
    Local::now().format("%Y-%m-%d_%H-%M-%S").to_string()
}
