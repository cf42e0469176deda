//! Error types for the logging crate

use std::path::PathBuf;

use thiserror::Error;

/// Failures that propagate to callers.
///
/// Everything else on the logging path (rotation, flush writes, timer
/// scheduling) is reported to stderr and swallowed so that logging never
/// interrupts the host program.
#[derive(Debug, Error)]
pub enum Error {
    /// A logging entry point was called before [`Logger::configure`] ran.
    ///
    /// [`Logger::configure`]: crate::Logger::configure
    #[error("logging is not configured; call Logger::configure first")]
    ConfigurationMissing,

    /// The log directory could not be created or the header line could not
    /// be written during configuration. Fatal to startup.
    #[error("failed to initialize log file at {path:?}: {source}")]
    LogFileInit {
        path: PathBuf,
        source: std::io::Error,
    },
}
