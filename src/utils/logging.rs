//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to
//! %APPDATA%\LaunchOnPlease\app.log, rotated on every start so the last ten
//! runs stay readable. Headless launches started from shortcuts have no
//! window to report problems in, so they can mirror warnings to stderr.

use crate::config::ConfigManager;
use crate::error::{LaunchError, Result, StringError};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Maximum number of historical log files to keep (app.log.1 through app.log.9)
const MAX_LOG_FILES: u8 = 9;

/// Current log file name
const LOG_FILE_NAME: &str = "app.log";

/// Initialize the logging system
///
/// Log level defaults to INFO but can be configured via `RUST_LOG`. With
/// `mirror_to_stderr`, WARN and above are also printed to stderr.
///
/// Two shortcuts clicked in quick succession start two launchers that share
/// the log directory; when the previous log is still held open rotation is
/// skipped and the new run appends to it.
pub fn init_logging(mirror_to_stderr: bool) -> Result<()> {
    let log_dir = ConfigManager::get_app_dir();
    std::fs::create_dir_all(&log_dir)?;

    let rotation = rotate_logs_on_startup(&log_dir.join(LOG_FILE_NAME));

    // Rotation is handled above, the appender only writes
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("app")
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| LaunchError::ConfigError(Box::new(e)))?;

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let stderr_layer = mirror_to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .with_filter(LevelFilter::WARN)
    });

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| LaunchError::ConfigError(Box::new(e)))?;

    if let Err(e) = rotation {
        tracing::warn!("Log rotation skipped: {}", e);
    }
    tracing::info!("Launch on Please v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Rotate log files on application startup
///
/// - app.log.9 is deleted
/// - app.log.N -> app.log.N+1 for N = 8..1
/// - app.log -> app.log.1
///
/// A fresh app.log is created by the logger afterwards.
fn rotate_logs_on_startup(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path
        .parent()
        .ok_or_else(|| LaunchError::ConfigError(StringError::new("Invalid log path")))?;
    let log_name = log_path
        .file_name()
        .ok_or_else(|| LaunchError::ConfigError(StringError::new("Invalid log filename")))?
        .to_string_lossy();

    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        if current_log.exists() {
            std::fs::rename(&current_log, log_dir.join(format!("{log_name}.{}", i + 1)))?;
        }
    }

    std::fs::rename(log_path, log_dir.join(format!("{log_name}.1")))?;
    Ok(())
}
