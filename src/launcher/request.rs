//! What to launch and where

use crate::config::{LastLaunch, MAX_OBSERVE_SECS};
use crate::error::{LaunchError, Result};
use crate::placement::PlacementMode;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A single launch: program, target monitor, window state and watch time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Program to start
    pub exe_path: PathBuf,
    /// 0-based monitor index in spatial order
    pub monitor_index: usize,
    /// Window state to apply
    pub mode: PlacementMode,
    /// Seconds to keep correcting the window after placing it
    pub observe_secs: u32,
}

impl LaunchRequest {
    /// Create a launch request
    pub fn new(
        exe_path: impl Into<PathBuf>,
        monitor_index: usize,
        mode: PlacementMode,
        observe_secs: u32,
    ) -> Self {
        Self {
            exe_path: exe_path.into(),
            monitor_index,
            mode,
            observe_secs,
        }
    }

    /// Check that the program exists and is a file
    pub fn validate(&self) -> Result<()> {
        if self.exe_path.as_os_str().is_empty() || !self.exe_path.is_file() {
            return Err(LaunchError::InvalidExecutable(self.exe_path.clone()));
        }
        Ok(())
    }

    /// Copy with `observe_secs` limited to what the GUI offers
    #[must_use]
    pub fn with_gui_limits(mut self) -> Self {
        self.observe_secs = self.observe_secs.min(MAX_OBSERVE_SECS);
        self
    }

    /// Watch time as a `Duration`
    pub fn observe(&self) -> Duration {
        Duration::from_secs(u64::from(self.observe_secs))
    }

    /// Record this request as the last launch
    pub fn to_last_launch(&self) -> LastLaunch {
        LastLaunch {
            exe_path: Some(self.exe_path.clone()),
            monitor_index: self.monitor_index,
            mode: self.mode,
            observe_secs: self.observe_secs,
        }
    }
}

/// Turn a typed or pasted path into a `PathBuf`
///
/// Surrounding whitespace and one pair of double quotes (as produced by
/// Explorer's "Copy as path") are removed.
pub fn normalize_path_input(text: &str) -> PathBuf {
    let trimmed = text.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(unquoted.trim())
}

/// Turn a typed, pasted or command-line path into an absolute program path
///
/// Relative paths resolve against the current directory without touching the
/// file system, so a bare `app.exe` names the file next to the caller rather
/// than a `PATH` lookup. Input that cannot be made absolute is returned as
/// typed and fails `LaunchRequest::validate` later.
pub fn resolve_program_path(text: &str) -> PathBuf {
    let path = normalize_path_input(text);
    if path.as_os_str().is_empty() {
        return path;
    }
    std::path::absolute(&path).unwrap_or(path)
}

/// Directory the program should start in: its own folder, or the current
/// directory when the path has none
pub fn working_dir_for(exe_path: &Path) -> PathBuf {
    exe_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_default()
}
