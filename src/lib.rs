//! Echolog - process-local logging with a buffered, debounced file writer
//!
//! Lines are tagged with a severity, buffered in memory, and appended to a
//! rotating log file once a quiet period has elapsed since the last emit;
//! messages can also be echoed to the console as they arrive.
//!
//! ```no_run
//! use echolog::{LogConfig, Logger};
//!
//! # fn main() -> Result<(), echolog::Error> {
//! let logger = Logger::init(LogConfig::default)?;
//! logger.info("startup", "listening on 127.0.0.1:9999")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logger;
pub mod sink;

pub use config::{user_log_dir, LogConfig};
pub use error::Error;
pub use logger::Logger;
pub use sink::LogLevel;
