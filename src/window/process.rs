//! Process table snapshots
//!
//! A launched program often hands its window to a child process (launchers,
//! updaters, Electron helpers), so the pipeline tracks the whole process tree
//! below the PID it spawned. Snapshots are taken with Toolhelp32 on Windows.

use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};

/// One row of the process table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    /// Process ID
    pub pid: u32,
    /// Parent process ID
    pub parent_pid: u32,
    /// Executable file name, lowercase, with extension (e.g. "notepad.exe")
    pub exe_name: String,
}

/// Point-in-time copy of the process table
#[derive(Debug, Clone, Default)]
pub struct ProcessSnapshot {
    by_pid: HashMap<u32, ProcessEntry>,
    children: HashMap<u32, SmallVec<[u32; 4]>>,
}

impl ProcessSnapshot {
    /// Build a snapshot from process table rows
    pub fn from_entries(entries: impl IntoIterator<Item = ProcessEntry>) -> Self {
        let mut by_pid = HashMap::new();
        let mut children: HashMap<u32, SmallVec<[u32; 4]>> = HashMap::new();
        for entry in entries {
            // PID 0 lists itself as its own parent
            if entry.pid != entry.parent_pid {
                children.entry(entry.parent_pid).or_default().push(entry.pid);
            }
            by_pid.insert(entry.pid, entry);
        }
        Self { by_pid, children }
    }

    /// Number of processes in the snapshot
    pub fn len(&self) -> usize {
        self.by_pid.len()
    }

    /// Whether the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.by_pid.is_empty()
    }

    /// Lowercase executable name of `pid`
    pub fn exe_name_of(&self, pid: u32) -> Option<&str> {
        self.by_pid.get(&pid).map(|e| e.exe_name.as_str())
    }

    /// All transitive children of `root`, excluding `root` itself
    pub fn descendants_of(&self, root: u32) -> HashSet<u32> {
        let mut found = HashSet::new();
        let mut frontier: SmallVec<[u32; 16]> = SmallVec::new();
        frontier.push(root);

        while let Some(pid) = frontier.pop() {
            let Some(kids) = self.children.get(&pid) else {
                continue;
            };
            for &kid in kids {
                // Guards against PID reuse producing a cycle
                if kid != root && found.insert(kid) {
                    frontier.push(kid);
                }
            }
        }
        found
    }
}

/// Lowercase file name of an executable path, keeping the extension
///
/// Examples:
/// - "C:\\Program Files\\App\\App.EXE" -> "app.exe"
/// - "/usr/bin/tool" -> "tool"
pub fn exe_file_name(path: &str) -> String {
    let filename = path.rsplit(['\\', '/']).next().unwrap_or(path);
    filename.to_lowercase()
}

/// Take a snapshot of all running processes
#[cfg(windows)]
pub fn snapshot_processes() -> crate::error::Result<ProcessSnapshot> {
    win32::snapshot()
}

/// Take a snapshot of all running processes (unsupported off Windows)
#[cfg(not(windows))]
pub fn snapshot_processes() -> crate::error::Result<ProcessSnapshot> {
    Err(crate::error::LaunchError::PlatformUnsupported(
        "Process enumeration",
    ))
}

#[cfg(windows)]
mod win32 {
    use super::{ProcessEntry, ProcessSnapshot, exe_file_name};
    use crate::error::{LaunchError, Result};
    use tracing::{error, warn};
    use windows::Win32::Foundation::{CloseHandle, ERROR_NO_MORE_FILES, HANDLE};
    use windows::Win32::System::Diagnostics::ToolHelp::{
        CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW,
        TH32CS_SNAPPROCESS,
    };

    /// RAII guard for a Toolhelp snapshot handle
    struct SnapshotGuard(HANDLE);

    impl Drop for SnapshotGuard {
        #[expect(
            unsafe_code,
            reason = "Windows FFI for CloseHandle to release snapshot handle"
        )]
        fn drop(&mut self) {
            unsafe {
                let _ = CloseHandle(self.0);
            }
        }
    }

    /// Convert the null-terminated `szExeFile` buffer
    fn wide_to_string(buffer: &[u16]) -> String {
        let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
        String::from_utf16_lossy(&buffer[..len])
    }

    /// Walk the process table with Toolhelp32
    ///
    /// # Safety
    ///
    /// `PROCESSENTRY32W` is initialized with the correct `dwSize`; the handle
    /// is owned by `SnapshotGuard`; `ERROR_NO_MORE_FILES` ends iteration.
    #[expect(
        unsafe_code,
        reason = "Windows FFI for process enumeration via CreateToolhelp32Snapshot and Process32FirstW/NextW"
    )]
    pub(super) fn snapshot() -> Result<ProcessSnapshot> {
        let handle = unsafe {
            CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0).map_err(|e| {
                error!("Windows API error - CreateToolhelp32Snapshot failed: {e}");
                LaunchError::ProcessError(Box::new(e))
            })?
        };
        let _guard = SnapshotGuard(handle);

        #[expect(
            clippy::cast_possible_truncation,
            reason = "size_of::<PROCESSENTRY32W>() is a compile-time constant that fits in u32"
        )]
        let mut entry = PROCESSENTRY32W {
            dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
            ..Default::default()
        };

        let mut entries = Vec::with_capacity(256);
        let mut has_process = unsafe { Process32FirstW(handle, &raw mut entry).is_ok() };
        while has_process {
            entries.push(ProcessEntry {
                pid: entry.th32ProcessID,
                parent_pid: entry.th32ParentProcessID,
                exe_name: exe_file_name(&wide_to_string(&entry.szExeFile)),
            });

            has_process = match unsafe { Process32NextW(handle, &raw mut entry) } {
                Ok(()) => true,
                Err(e) => {
                    if e.code() != ERROR_NO_MORE_FILES.to_hresult() {
                        warn!("Error iterating processes: {e}");
                    }
                    false
                }
            };
        }

        Ok(ProcessSnapshot::from_entries(entries))
    }
}
