//! Logging configuration using tracing
//!
//! This is the engine's *internal* diagnostics channel. Intercepted
//! subject-program logs go into the bounded buffers and never pass through
//! here; mixing the two would make the engine's own output part of the data
//! it collects.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/pagescope/logs/`
/// Log level is controlled by the `PAGESCOPE_LOG` environment variable.
///
/// # Examples
/// ```bash
/// PAGESCOPE_LOG=debug cargo run
/// PAGESCOPE_LOG=trace cargo run
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "pagescope.log");

    // Default to info, allow override via PAGESCOPE_LOG
    let env_filter = EnvFilter::try_from_env("PAGESCOPE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("pagescope=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("Pagescope engine starting");
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("pagescope").join("logs"))
}

/// Get the log file path for the current day
pub fn get_current_log_file() -> Result<PathBuf> {
    let dir = get_log_directory()?;
    Ok(dir.join("pagescope.log"))
}
