//! Error types for `Launch on Please`
//!
//! This module defines all error types used throughout the application,
//! providing clear error messages and proper error propagation.
//!
//! Variants that wrap a lower-level failure use `#[source]` so the full
//! error chain stays visible in logs.

use std::path::PathBuf;
use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `Launch on Please`
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The operating system reported no display monitors
    #[error("No monitors detected.")]
    NoMonitors,

    /// The requested monitor index does not exist
    #[error("Monitor index {index} out of range (found {count}).")]
    MonitorOutOfRange {
        /// Requested 0-based index
        index: usize,
        /// Number of monitors currently attached
        count: usize,
    },

    /// The program to launch is missing or not a file
    #[error("Invalid executable path: {}", .0.display())]
    InvalidExecutable(PathBuf),

    /// No main window appeared for the launched program
    #[error("Could not find a stable main window for the launched app.")]
    WindowNotFound,

    /// Failed to start or inspect a process
    #[error("Process error: {0}")]
    ProcessError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Failed to move, resize or change the state of a window
    #[error("Window placement failed: {0}")]
    PlacementFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Failed to write a desktop shortcut
    #[error("Shortcut error: {0}")]
    ShortcutError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The operation needs Windows
    #[error("{0} is only supported on Windows")]
    PlatformUnsupported(&'static str),

    /// Windows API error
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApiError(#[from] windows::core::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for `Launch on Please` operations
pub type Result<T> = std::result::Result<T, LaunchError>;

/// Convert an error to a user-friendly message
///
/// Returns text suitable for the error dialogs shown by the GUI, including a
/// short hint on how to recover where one exists.
pub fn get_user_friendly_error(error: &LaunchError) -> String {
    match error {
        LaunchError::NoMonitors => "No monitors detected.\n\n\
             Make sure at least one display is connected and turned on."
            .to_string(),
        LaunchError::MonitorOutOfRange { index, count } => {
            format!(
                "Monitor index {index} out of range (found {count}).\n\n\
                 A display may have been disconnected since the shortcut was created.\n\
                 Pick the monitor again and recreate the shortcut."
            )
        }
        LaunchError::InvalidExecutable(_) => "Please select a valid .exe file.".to_string(),
        LaunchError::WindowNotFound => {
            "Could not find a stable main window for the launched app.\n\n\
             The program may still be starting, or it may not open a regular window.\n\
             Try a longer watch time or launch it again."
                .to_string()
        }
        LaunchError::ProcessError(e) => {
            format!(
                "Failed to start the program:\n\n{e}\n\n\
                 Check that the file exists and that you are allowed to run it."
            )
        }
        LaunchError::PlacementFailed(e) => {
            format!(
                "The program started but its window could not be moved:\n\n{e}\n\n\
                 Programs running as administrator cannot be moved by a normal user."
            )
        }
        LaunchError::ShortcutError(e) => format!("Failed to create shortcut:\n{e}"),
        LaunchError::ConfigError(_) => "Failed to load or save settings.\n\n\
             Your last selection may not be remembered.\n\
             Check that you have write permissions to:\n\
             %APPDATA%\\LaunchOnPlease"
            .to_string(),
        LaunchError::PlatformUnsupported(what) => {
            format!("{what} is only supported on Windows.")
        }
        #[cfg(windows)]
        LaunchError::WindowsApiError(e) => {
            format!(
                "A Windows API error occurred:\n\n{e}\n\n\
                 Please ensure your Windows installation is up to date."
            )
        }
        LaunchError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        LaunchError::JsonError(e) => {
            format!(
                "Settings file is corrupted:\n\n{e}\n\n\
                 The application will use default settings."
            )
        }
    }
}
