//! End-to-end walkthrough of the logging surface
//!
//! Run with: cargo run --example basic

use std::time::Duration;

use anyhow::Result;

use echolog::{LogConfig, Logger};

#[tokio::main]
async fn main() -> Result<()> {
    let logger = Logger::init(|| LogConfig {
        console_logs_enabled: true,
        log_file_enabled: true,
        overwrite_log_file: true,
        ..LogConfig::default()
    })?;

    logger.debug("basic", "debug message")?;
    logger.info("basic", "info message")?;

    let err = std::io::Error::new(std::io::ErrorKind::Other, "actual error");
    logger.error_with("basic", "erro", &err)?;
    logger.error("basic", "erro2")?;

    logger.warn("basic", "warn message")?;

    let fatal = logger.fatal("basic", "unrecoverable state")?;

    // Let the debounced flush land before the process exits.
    tokio::time::sleep(Duration::from_millis(600)).await;

    anyhow::bail!("{fatal}")
}
