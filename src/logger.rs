//! Logger handle and severity entry points
//!
//! The handle wraps the shared sink behind an `Arc`: construct one at
//! process start, configure it, and pass clones to call sites.

use std::fmt;
use std::sync::Arc;

use crate::config::LogConfig;
use crate::error::Error;
use crate::sink::{LogLevel, LogSink};

/// Cloneable handle to the process logger
///
/// All clones share one sink, so lines emitted through any of them land in
/// the same buffer and the same log file. Every logging call fails with
/// [`Error::ConfigurationMissing`] until [`configure`] has run.
///
/// [`configure`]: Logger::configure
#[derive(Clone)]
pub struct Logger {
    sink: Arc<LogSink>,
}

impl Logger {
    /// Create an unconfigured handle
    pub fn new() -> Self {
        Self {
            sink: Arc::new(LogSink::new()),
        }
    }

    /// Create a handle and configure it in one step
    pub fn init(producer: impl FnOnce() -> LogConfig) -> Result<Self, Error> {
        let logger = Self::new();
        logger.configure(producer)?;
        Ok(logger)
    }

    /// Run `producer` exactly once, store its configuration, and resolve
    /// the log file before returning
    ///
    /// Any emit issued after this returns observes the fully resolved file.
    /// Calling again is allowed and re-runs resolution with the new
    /// configuration, rotating or overwriting the file a second time.
    pub fn configure(&self, producer: impl FnOnce() -> LogConfig) -> Result<(), Error> {
        self.sink.configure(producer)
    }

    /// Log an already-formatted message at an explicit level, without the
    /// caller-tag prefix
    pub fn emit(&self, level: LogLevel, message: &str) -> Result<(), Error> {
        self.sink.emit(level, message)
    }

    /// Log at Debug severity
    pub fn debug(&self, tag: &str, message: &str) -> Result<(), Error> {
        self.sink.emit(LogLevel::Debug, &tagged(tag, message))
    }

    /// Log at Info severity
    pub fn info(&self, tag: &str, message: &str) -> Result<(), Error> {
        self.sink.emit(LogLevel::Info, &tagged(tag, message))
    }

    /// Log at Warning severity
    pub fn warn(&self, tag: &str, message: &str) -> Result<(), Error> {
        self.sink.emit(LogLevel::Warning, &tagged(tag, message))
    }

    /// Log at Error severity
    pub fn error(&self, tag: &str, message: &str) -> Result<(), Error> {
        self.sink
            .emit(LogLevel::Error, &format!("{}\n", tagged(tag, message)))
    }

    /// Log at Error severity with the failure that caused it
    ///
    /// The source error and its cause chain are rendered after the message:
    /// `→ <error type>: <error>` followed by one `↪` line per cause.
    pub fn error_with<E>(&self, tag: &str, message: &str, source: &E) -> Result<(), Error>
    where
        E: std::error::Error,
    {
        let mut text = format!(
            "{message}→ {}: {source}\n",
            std::any::type_name::<E>()
        );

        let mut cause = source.source();
        while let Some(c) = cause {
            text.push_str(&format!("  ↪ {c}\n"));
            cause = c.source();
        }

        self.sink
            .emit(LogLevel::Error, &format!("{}\n", tagged(tag, &text)))
    }

    /// Log at Fatal severity and return the tagged message
    ///
    /// Accepts anything displayable (a string, an error). Never terminates
    /// the process and never panics; whether to abort with the returned
    /// string is the caller's decision.
    pub fn fatal(&self, tag: &str, message: impl fmt::Display) -> Result<String, Error> {
        let text = tagged(tag, &message.to_string());
        self.sink.emit(LogLevel::Fatal, &text)?;
        Ok(text)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefix a message with its caller tag
fn tagged(tag: &str, message: &str) -> String {
    format!("{tag}> {message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    #[derive(Debug)]
    struct BrokenPipe {
        cause: std::io::Error,
    }

    impl fmt::Display for BrokenPipe {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "pipe closed mid-write")
        }
    }

    impl std::error::Error for BrokenPipe {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.cause)
        }
    }

    fn quiet_config(dir: &TempDir) -> LogConfig {
        LogConfig {
            console_logs_enabled: false,
            log_dir: dir.path().join("logs"),
            ..LogConfig::default()
        }
    }

    fn read_latest(dir: &TempDir) -> String {
        fs::read_to_string(dir.path().join("logs").join("Latest.log")).unwrap()
    }

    #[test]
    fn test_every_entry_point_requires_configuration() {
        let logger = Logger::new();

        assert!(matches!(
            logger.debug("tests", "x"),
            Err(Error::ConfigurationMissing)
        ));
        assert!(matches!(
            logger.info("tests", "x"),
            Err(Error::ConfigurationMissing)
        ));
        assert!(matches!(
            logger.warn("tests", "x"),
            Err(Error::ConfigurationMissing)
        ));
        assert!(matches!(
            logger.error("tests", "x"),
            Err(Error::ConfigurationMissing)
        ));
        assert!(matches!(
            logger.error_with("tests", "x", &std::io::Error::new(std::io::ErrorKind::Other, "e")),
            Err(Error::ConfigurationMissing)
        ));
        assert!(matches!(
            logger.fatal("tests", "x"),
            Err(Error::ConfigurationMissing)
        ));
        assert!(matches!(
            logger.emit(LogLevel::Info, "x"),
            Err(Error::ConfigurationMissing)
        ));
    }

    #[test]
    fn test_configure_then_emit_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let logger = Logger::init(|| quiet_config(&temp_dir)).unwrap();

        assert!(logger.info("tests", "right after configure").is_ok());
    }

    #[test]
    fn test_clones_share_the_sink() {
        let temp_dir = TempDir::new().unwrap();
        let logger = Logger::new();
        let clone = logger.clone();

        logger.configure(|| quiet_config(&temp_dir)).unwrap();

        // Configuring through one handle configures them all.
        assert!(clone.info("tests", "via clone").is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lines_carry_tag_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let logger = Logger::init(|| quiet_config(&temp_dir)).unwrap();

        logger.info("startup", "listening").unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert!(read_latest(&temp_dir).contains("[ Info ] : startup> listening"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_without_source_has_no_arrow() {
        let temp_dir = TempDir::new().unwrap();
        let logger = Logger::init(|| quiet_config(&temp_dir)).unwrap();

        logger.error("tests", "erro2").unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;

        let content = read_latest(&temp_dir);
        assert!(content.contains("[ Error ] : tests> erro2"));
        assert!(!content.contains('→'));
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_with_source_renders_chain() {
        let temp_dir = TempDir::new().unwrap();
        let logger = Logger::init(|| quiet_config(&temp_dir)).unwrap();

        let err = BrokenPipe {
            cause: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "actual error"),
        };
        logger.error_with("tests", "erro", &err).unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;

        let content = read_latest(&temp_dir);
        assert!(content.contains("tests> erro→ "));
        assert!(content.contains("BrokenPipe: pipe closed mid-write"));
        assert!(content.contains("  ↪ actual error"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_returns_tagged_message() {
        let temp_dir = TempDir::new().unwrap();
        let logger = Logger::init(|| quiet_config(&temp_dir)).unwrap();

        let text = logger.fatal("tests", "out of descriptors").unwrap();
        assert_eq!(text, "tests> out of descriptors");

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(read_latest(&temp_dir).contains("[ Fatal ] : tests> out of descriptors"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_accepts_error_values() {
        let temp_dir = TempDir::new().unwrap();
        let logger = Logger::init(|| quiet_config(&temp_dir)).unwrap();

        let err = std::io::Error::new(std::io::ErrorKind::Other, "cabo");
        let text = logger.fatal("tests", &err).unwrap();
        assert_eq!(text, "tests> cabo");
    }
}
