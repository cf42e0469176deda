//! Buffered log sink with debounced file flushing
//!
//! Owns the configuration gate, the resolved log file path, the pending-text
//! buffer, and the flush timer. Emitted lines accumulate in memory and are
//! appended to the file in one batch once a quiet period has elapsed.

mod debounce;
mod file;

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use chrono::Local;

use debounce::Debouncer;

use crate::config::{ConfigCell, LogConfig};
use crate::error::Error;

/// Quiet period between the last emit of a burst and the flush it triggers
pub(crate) const FLUSH_DELAY: Duration = Duration::from_millis(500);

/// Log severity
///
/// String-valued: each level displays as its capitalized name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Debug,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    /// Get the display name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Fatal => "Fatal",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buffered, debounced log sink
///
/// One sink sits behind every clone of a [`Logger`] handle. Emit appends a
/// formatted line to the pending buffer, (re)starts the flush timer, and
/// echoes to stdout; the fired timer drains the buffer to the log file in a
/// single open-append-close cycle.
///
/// [`Logger`]: crate::Logger
pub struct LogSink {
    config: ConfigCell,
    path: RwLock<Option<PathBuf>>,
    pending: Mutex<String>,
    debounce: Debouncer,
}

impl LogSink {
    pub(crate) fn new() -> Self {
        Self {
            config: ConfigCell::default(),
            path: RwLock::new(None),
            pending: Mutex::new(String::new()),
            debounce: Debouncer::new(FLUSH_DELAY),
        }
    }

    /// Store the configuration produced by `producer`, then resolve the log
    /// file (rotating or overwriting any previous one) before returning
    pub(crate) fn configure(
        &self,
        producer: impl FnOnce() -> LogConfig,
    ) -> Result<(), Error> {
        let config = producer();
        self.config.set(config.clone());

        let resolved = file::resolve_log_file(&config)?;
        if let Ok(mut path) = self.path.write() {
            *path = Some(resolved);
        }
        Ok(())
    }

    /// Format `message` with the current time and `level`, buffer it, and
    /// schedule a debounced flush
    ///
    /// Fails only with [`Error::ConfigurationMissing`]; every other failure
    /// on this path (in practice: no tokio runtime to schedule the flush on)
    /// is reported to stderr and swallowed so the caller's program flow is
    /// never interrupted.
    pub(crate) fn emit(self: &Arc<Self>, level: LogLevel, message: &str) -> Result<(), Error> {
        let config = self.config.get()?;

        let timestamp = Local::now().format("%H:%M:%S");
        if let Ok(mut pending) = self.pending.lock() {
            pending.push_str(&format!("[ {timestamp} ][ {level} ] : {message}\n"));
        }

        // Scheduled even when file logging is disabled; the flush is a
        // no-op in that case.
        let sink = Arc::clone(self);
        if let Err(e) = self.debounce.call(move || sink.flush()) {
            eprintln!("failed to schedule log flush: {e}");
        }

        if config.console_logs_enabled {
            println!("{message}");
        }

        Ok(())
    }

    /// Drain the pending buffer to the log file
    ///
    /// No-op while file logging is disabled or no path is resolved; the
    /// buffer keeps accumulating. A failed write is reported to stderr and
    /// the buffer is kept so its lines ride along with the next flush.
    fn flush(&self) {
        let config = match self.config.get() {
            Ok(config) => config,
            Err(_) => return,
        };
        if !config.log_file_enabled {
            return;
        }

        let path = match self.path.read() {
            Ok(guard) => match guard.as_ref() {
                Some(path) => path.clone(),
                None => return,
            },
            Err(_) => return,
        };

        if let Ok(mut pending) = self.pending.lock() {
            let result = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .and_then(|mut file| file.write_all(pending.as_bytes()));

            match result {
                Ok(()) => pending.clear(),
                Err(e) => eprintln!("failed to flush log buffer to {}: {e}", path.display()),
            }
        }
    }

    #[cfg(test)]
    fn pending_len(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }
}
