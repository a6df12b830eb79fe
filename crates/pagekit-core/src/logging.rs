//! Logging setup
//!
//! All tracing output goes to a daily log file. stdout carries only the
//! headless NDJSON stream, so nothing here may write to it.
//!
//! The filter is read from `PAGEKIT_LOG`:
//! ```bash
//! PAGEKIT_LOG=debug pagekit page.toml
//! PAGEKIT_LOG=pagekit_app::handler=trace pagekit page.toml
//! ```

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

const LOG_ENV: &str = "PAGEKIT_LOG";
const DEFAULT_DIRECTIVES: &str = "pagekit=info,pagekit_app=info,pagekit_core=info,warn";
/// Daily files kept before the oldest is deleted
const KEEP_LOG_FILES: usize = 7;

/// Install the global subscriber. Returns the directory holding the
/// `pagekit.YYYY-MM-DD.log` files.
pub fn init() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    let log_dir = log_directory_in(&base);
    std::fs::create_dir_all(&log_dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("pagekit")
        .filename_suffix("log")
        .max_log_files(KEEP_LOG_FILES)
        .build(&log_dir)
        .map_err(|e| {
            Error::config(format!(
                "Failed to open log file in {}: {}",
                log_dir.display(),
                e
            ))
        })?;

    tracing_subscriber::registry()
        .with(filter())
        .with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| Error::config(format!("Logging already initialized: {}", e)))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_dir = %log_dir.display(),
        "pagekit logging started"
    );
    Ok(log_dir)
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

fn log_directory_in(base: &Path) -> PathBuf {
    base.join("pagekit").join("logs")
}
