//! Main window selection
//!
//! After a launch the desktop usually has several plausible windows: splash
//! screens, the real main window, windows that were already open. Each visible
//! main-style window that is large enough gets a score from three independent
//! signals and the best `(score, area)` wins.

use crate::config::Preferences;
use crate::error::Result;
use crate::window::{ProcessSnapshot, WindowHandle, WindowInfo, WindowSystem};
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Score for a window owned by the launched process tree
pub const SCORE_PID_MATCH: u32 = 1000;
/// Score for a window whose process has the launched executable's file name
pub const SCORE_EXE_MATCH: u32 = 500;
/// Score for a window that did not exist before the launch
pub const SCORE_NEW_WINDOW: u32 = 200;

/// Which signals to use when looking for the launched program's window
///
/// Every field is optional; an empty query matches nothing.
#[derive(Debug, Clone, Default)]
pub struct WindowQuery {
    /// PIDs of the launched process and its descendants
    pub pid_set: Option<HashSet<u32>>,
    /// Lowercase executable file name of the launched program
    pub exe_name: Option<String>,
    /// Windows that were visible before the launch
    pub windows_before: Option<HashSet<WindowHandle>>,
}

impl WindowQuery {
    /// Query that only looks for windows created after `windows_before`
    pub fn new_windows_only(windows_before: HashSet<WindowHandle>) -> Self {
        Self {
            pid_set: None,
            exe_name: None,
            windows_before: Some(windows_before),
        }
    }
}

/// Score a window against a query
///
/// `exe_name` is the lowercase executable name of the window's process, if
/// known.
pub fn score(window: &WindowInfo, exe_name: Option<&str>, query: &WindowQuery) -> u32 {
    let mut total = 0;
    if query
        .pid_set
        .as_ref()
        .is_some_and(|pids| pids.contains(&window.pid))
    {
        total += SCORE_PID_MATCH;
    }
    if let (Some(wanted), Some(actual)) = (query.exe_name.as_deref(), exe_name)
        && !wanted.is_empty()
        && wanted.eq_ignore_ascii_case(actual)
    {
        total += SCORE_EXE_MATCH;
    }
    if query
        .windows_before
        .as_ref()
        .is_some_and(|before| !before.contains(&window.handle))
    {
        total += SCORE_NEW_WINDOW;
    }
    total
}

/// Pick the best-scoring window among `windows`
///
/// Windows that are not main-style, have no rectangle, or are smaller than the
/// configured minimum size are skipped, as are windows scoring zero.
pub fn best_window(
    windows: &[WindowInfo],
    processes: &ProcessSnapshot,
    query: &WindowQuery,
    prefs: &Preferences,
) -> Option<WindowHandle> {
    windows
        .iter()
        .filter(|w| w.main_style)
        .filter_map(|w| {
            let rect = w.rect?;
            if rect.width() < prefs.min_window_width || rect.height() < prefs.min_window_height {
                return None;
            }
            let points = score(w, processes.exe_name_of(w.pid), query);
            trace!("Candidate {:?} (pid {}) scored {}", w.handle, w.pid, points);
            (points > 0).then_some((points, rect.area(), w.handle))
        })
        .max_by_key(|&(points, area, _)| (points, area))
        .map(|(_, _, handle)| handle)
}

/// Enumerate the desktop and pick the best window for `query`
///
/// A failed process snapshot only disables exe-name matching; PID and
/// new-window signals still work.
pub fn pick_best_window(
    system: &dyn WindowSystem,
    query: &WindowQuery,
    prefs: &Preferences,
) -> Result<Option<WindowHandle>> {
    let windows = system.visible_windows()?;
    let processes = if query.exe_name.is_some() {
        system.process_snapshot().unwrap_or_else(|e| {
            warn!("Process snapshot failed, skipping exe name matching: {}", e);
            ProcessSnapshot::default()
        })
    } else {
        ProcessSnapshot::default()
    };

    let best = best_window(&windows, &processes, query, prefs);
    if let Some(handle) = best {
        debug!("Best window candidate: {:?}", handle);
    }
    Ok(best)
}
