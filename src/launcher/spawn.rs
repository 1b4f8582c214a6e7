//! Starting the target program

use crate::error::{LaunchError, Result};
use crate::launcher::request::working_dir_for;
use std::path::Path;
use std::process::Command;
use tracing::info;

/// Starts programs for the launch pipeline
pub trait Spawner: Send + Sync {
    /// Start `exe_path` and return its process ID
    fn spawn(&self, exe_path: &Path) -> Result<u32>;
}

/// `Spawner` that creates real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct OsSpawner;

impl Spawner for OsSpawner {
    fn spawn(&self, exe_path: &Path) -> Result<u32> {
        spawn_target(exe_path)
    }
}

/// Start `exe_path` without a console window, in its own directory
///
/// The child is detached: it keeps running after the launcher exits.
pub fn spawn_target(exe_path: &Path) -> Result<u32> {
    let mut command = Command::new(exe_path);
    command.current_dir(working_dir_for(exe_path));

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        use windows::Win32::System::Threading::CREATE_NO_WINDOW;
        command.creation_flags(CREATE_NO_WINDOW.0);
    }

    let child = command
        .spawn()
        .map_err(|e| LaunchError::ProcessError(Box::new(e)))?;
    let pid = child.id();
    info!("Started {} (pid {})", exe_path.display(), pid);
    Ok(pid)
}
