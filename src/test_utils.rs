#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for `Launch on Please` unit tests.
//!
//! Besides the APPDATA guard used by the config tests, this module provides
//! `FakeDesktop`: a scripted `WindowSystem` and `Spawner` whose clock is the
//! number of polls the pipeline has made. It is only compiled during testing
//! (`#[cfg(test)]`).

use crate::config::Preferences;
use crate::display::{Monitor, MonitorHandle, Rect, sort_spatially};
use crate::error::{LaunchError, Result, StringError};
use crate::launcher::Spawner;
use crate::window::{
    ProcessEntry, ProcessSnapshot, ShowCommand, WindowHandle, WindowInfo, WindowSystem,
};
use parking_lot::Mutex as PlMutex;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize tests that modify the APPDATA environment variable.
/// This prevents race conditions when multiple tests run in parallel and try to
/// set different APPDATA values.
static APPDATA_LOCK: Mutex<()> = Mutex::new(());

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// RAII guard that sets the APPDATA environment variable for a test scope
/// and restores the original value when dropped.
///
/// # Safety Considerations
///
/// `std::env::set_var` and `std::env::remove_var` are unsafe because another
/// thread may read the environment concurrently. `APPDATA_LOCK` serializes
/// every test that touches APPDATA, each test points it at its own `TempDir`,
/// and `Drop` restores the previous value even when the test panics.
pub struct AppdataGuard {
    original: Option<String>,
    // Held for the guard's lifetime so APPDATA changes stay exclusive
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables under APPDATA_LOCK"
)]
impl AppdataGuard {
    /// Create a new guard that sets APPDATA to the given temp directory path.
    pub fn new(temp_dir: &TempDir) -> Self {
        let lock = APPDATA_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let original = std::env::var("APPDATA").ok();
        // SAFETY: APPDATA_LOCK is held, see struct-level documentation
        unsafe {
            std::env::set_var("APPDATA", temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables under APPDATA_LOCK"
)]
impl Drop for AppdataGuard {
    fn drop(&mut self) {
        // SAFETY: APPDATA_LOCK is still held by `_lock`
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var("APPDATA", original);
            }
        } else {
            unsafe {
                std::env::remove_var("APPDATA");
            }
        }
    }
}

/// Preferences with short timeouts and no settle pauses
pub fn fast_prefs() -> Preferences {
    Preferences {
        poll_interval_ms: 1,
        wait_timeout_secs: 1,
        fallback_timeout_secs: 1,
        stable_ms_before_move: 5,
        child_discovery_rounds: 2,
        restore_settle_ms: 0,
        park_settle_ms: 0,
        overlay_duration_ms: 250,
        ..Preferences::default()
    }
}

/// Mutating call recorded by `FakeDesktop`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
    /// `WindowSystem::show`
    Show(WindowHandle, ShowCommand),
    /// `WindowSystem::set_bounds`
    SetBounds(WindowHandle, Rect),
}

/// What a window does on its own after it has been placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeReaction {
    /// Jump to this rectangle, like a program restoring its saved position
    MoveTo(Rect),
    /// Close the window
    Close,
}

/// What happens when the pipeline spawns a program
#[derive(Debug, Clone)]
pub struct SpawnPlan {
    /// PID returned to the caller
    pub pid: u32,
    /// Executable name of the spawned process
    pub exe_name: String,
    /// Child processes started by the program
    pub children: Vec<ProcessEntry>,
    /// Window `(handle, owner pid, rect)` the program opens, if any
    pub window: Option<(isize, u32, Rect)>,
    /// Polls before the window becomes visible
    pub appear_after_polls: u64,
}

#[derive(Debug, Clone)]
struct FakeWindow {
    handle: WindowHandle,
    pid: u32,
    rect: Rect,
    maximized: bool,
    visible: bool,
    main_style: bool,
}

#[derive(Debug)]
struct PendingReaction {
    window: WindowHandle,
    reaction: FakeReaction,
    remaining: u32,
    armed: bool,
}

#[derive(Debug, Default)]
struct DesktopState {
    polls: u64,
    monitors: Vec<(MonitorHandle, Rect, Rect)>,
    windows: Vec<FakeWindow>,
    pending: Vec<(u64, FakeWindow)>,
    processes: Vec<ProcessEntry>,
    spawn_plan: Option<SpawnPlan>,
    spawned: Vec<PathBuf>,
    reactions: Vec<PendingReaction>,
    calls: Vec<FakeCall>,
    fail_set_bounds: bool,
    fail_snapshot: bool,
    jitter: Option<(WindowHandle, i32)>,
}

impl DesktopState {
    /// Advance the scripted clock by one poll
    fn poll(&mut self) {
        self.polls += 1;
        let now = self.polls;

        let (due, later): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(at, _)| *at <= now);
        self.pending = later;
        self.windows.extend(due.into_iter().map(|(_, w)| w));

        if let Some((handle, dx)) = self.jitter {
            // Odd polls shift right, even polls shift back
            let shift = if now % 2 == 1 { dx } else { -dx };
            if let Some(w) = self.window_mut(handle) {
                w.rect = Rect::new(w.rect.left + shift, w.rect.top, w.rect.right + shift, w.rect.bottom);
            }
        }

        for reaction in &mut self.reactions {
            if !reaction.armed || reaction.remaining == 0 {
                continue;
            }
            reaction.armed = false;
            reaction.remaining -= 1;
            if let Some(window) = self.windows.iter_mut().find(|w| w.handle == reaction.window) {
                match reaction.reaction {
                    FakeReaction::MoveTo(rect) => {
                        window.rect = rect;
                        window.maximized = false;
                    }
                    FakeReaction::Close => window.visible = false,
                }
            }
        }
    }

    fn arm(&mut self, window: WindowHandle) {
        for reaction in &mut self.reactions {
            if reaction.window == window && reaction.remaining > 0 {
                reaction.armed = true;
            }
        }
    }

    fn window_mut(&mut self, handle: WindowHandle) -> Option<&mut FakeWindow> {
        self.windows.iter_mut().find(|w| w.handle == handle)
    }

    fn monitor_at(&self, rect: Rect) -> MonitorHandle {
        self.monitors
            .iter()
            .find(|(_, bounds, _)| bounds.contains(rect.center()))
            .or_else(|| self.monitors.first())
            .map(|(handle, _, _)| *handle)
            .unwrap_or_default()
    }

    fn work_area_of(&self, monitor: MonitorHandle) -> Rect {
        self.monitors
            .iter()
            .find(|(handle, _, _)| *handle == monitor)
            .map_or(Rect::new(0, 0, 1920, 1040), |(_, _, work)| *work)
    }
}

/// Scripted desktop
///
/// Every `visible_windows` and `is_window_alive` call counts as one poll;
/// windows scheduled by a `SpawnPlan` appear and reactions registered with
/// `react_after_placement` fire on poll boundaries.
#[derive(Debug, Default)]
pub struct FakeDesktop {
    state: PlMutex<DesktopState>,
}

impl FakeDesktop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_monitor(&self, handle: MonitorHandle, bounds: Rect, work_area: Rect) {
        self.state.lock().monitors.push((handle, bounds, work_area));
    }

    /// Add a visible main-style window that exists right away
    pub fn add_window(&self, handle: isize, pid: u32, rect: Rect) -> WindowHandle {
        let handle = WindowHandle(handle);
        self.state.lock().windows.push(FakeWindow {
            handle,
            pid,
            rect,
            maximized: false,
            visible: true,
            main_style: true,
        });
        handle
    }

    /// Add a tool window or other window that is not main-style
    pub fn add_tool_window(&self, handle: isize, pid: u32, rect: Rect) -> WindowHandle {
        let handle = self.add_window(handle, pid, rect);
        if let Some(w) = self.state.lock().window_mut(handle) {
            w.main_style = false;
        }
        handle
    }

    pub fn add_process(&self, pid: u32, parent_pid: u32, exe_name: &str) {
        self.state.lock().processes.push(ProcessEntry {
            pid,
            parent_pid,
            exe_name: exe_name.to_string(),
        });
    }

    /// Move a window right now, as the user or the program would
    pub fn move_window(&self, window: WindowHandle, rect: Rect) {
        if let Some(w) = self.state.lock().window_mut(window) {
            w.rect = rect;
        }
    }

    /// Shift `window` back and forth by `dx` pixels on every poll
    pub fn jitter(&self, window: WindowHandle, dx: i32) {
        self.state.lock().jitter = Some((window, dx));
    }

    pub fn set_maximized(&self, window: WindowHandle, maximized: bool) {
        if let Some(w) = self.state.lock().window_mut(window) {
            w.maximized = maximized;
        }
    }

    pub fn fail_set_bounds(&self, fail: bool) {
        self.state.lock().fail_set_bounds = fail;
    }

    pub fn fail_snapshot(&self, fail: bool) {
        self.state.lock().fail_snapshot = fail;
    }

    pub fn plan_spawn(&self, plan: SpawnPlan) {
        self.state.lock().spawn_plan = Some(plan);
    }

    /// Make `window` react `times` times, each on the poll after it was placed
    pub fn react_after_placement(&self, window: WindowHandle, reaction: FakeReaction, times: u32) {
        self.state.lock().reactions.push(PendingReaction {
            window,
            reaction,
            remaining: times,
            armed: false,
        });
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.state.lock().calls.clone()
    }

    pub fn spawned(&self) -> Vec<PathBuf> {
        self.state.lock().spawned.clone()
    }

    pub fn polls(&self) -> u64 {
        self.state.lock().polls
    }

    pub fn monitor_of(&self, window: WindowHandle) -> MonitorHandle {
        self.monitor_of_window(window)
    }
}

impl WindowSystem for FakeDesktop {
    fn monitors(&self) -> Result<Vec<Monitor>> {
        let state = self.state.lock();
        if state.monitors.is_empty() {
            return Err(LaunchError::NoMonitors);
        }
        Ok(sort_spatially(
            state
                .monitors
                .iter()
                .map(|&(handle, bounds, work_area)| Monitor {
                    index: 0,
                    handle,
                    bounds,
                    work_area,
                })
                .collect(),
        ))
    }

    fn visible_windows(&self) -> Result<Vec<WindowInfo>> {
        let mut state = self.state.lock();
        state.poll();
        Ok(state
            .windows
            .iter()
            .filter(|w| w.visible)
            .map(|w| WindowInfo {
                handle: w.handle,
                pid: w.pid,
                rect: Some(w.rect),
                main_style: w.main_style,
            })
            .collect())
    }

    fn window_rect(&self, window: WindowHandle) -> Option<Rect> {
        let state = self.state.lock();
        state
            .windows
            .iter()
            .find(|w| w.handle == window && w.visible)
            .map(|w| w.rect)
    }

    fn is_window_alive(&self, window: WindowHandle) -> bool {
        let mut state = self.state.lock();
        state.poll();
        state.windows.iter().any(|w| w.handle == window && w.visible)
    }

    fn monitor_of_window(&self, window: WindowHandle) -> MonitorHandle {
        let state = self.state.lock();
        let rect = state
            .windows
            .iter()
            .find(|w| w.handle == window)
            .map(|w| w.rect)
            .unwrap_or_default();
        state.monitor_at(rect)
    }

    fn is_maximized(&self, window: WindowHandle) -> bool {
        let state = self.state.lock();
        state
            .windows
            .iter()
            .any(|w| w.handle == window && w.maximized)
    }

    fn show(&self, window: WindowHandle, command: ShowCommand) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(FakeCall::Show(window, command));
        let current = state.window_mut(window).map(|w| w.rect);
        if let Some(rect) = current {
            let work = state.work_area_of(state.monitor_at(rect));
            let w = state.window_mut(window).unwrap();
            if command == ShowCommand::Maximize {
                w.rect = work;
                w.maximized = true;
            } else {
                w.maximized = false;
            }
        }
        if command == ShowCommand::Maximize {
            state.arm(window);
        }
        Ok(())
    }

    fn set_bounds(&self, window: WindowHandle, bounds: Rect) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(FakeCall::SetBounds(window, bounds));
        if state.fail_set_bounds {
            return Err(LaunchError::PlacementFailed(StringError::new(
                "access denied",
            )));
        }
        if let Some(w) = state.window_mut(window) {
            w.rect = bounds;
            w.maximized = false;
        }
        state.arm(window);
        Ok(())
    }

    fn work_area(&self, monitor: MonitorHandle) -> Rect {
        self.state.lock().work_area_of(monitor)
    }

    fn process_snapshot(&self) -> Result<ProcessSnapshot> {
        let state = self.state.lock();
        if state.fail_snapshot {
            return Err(LaunchError::ProcessError(StringError::new(
                "snapshot unavailable",
            )));
        }
        Ok(ProcessSnapshot::from_entries(state.processes.clone()))
    }
}

impl Spawner for FakeDesktop {
    fn spawn(&self, exe_path: &Path) -> Result<u32> {
        let mut state = self.state.lock();
        state.spawned.push(exe_path.to_path_buf());
        let plan = state.spawn_plan.clone().ok_or_else(|| {
            LaunchError::ProcessError(StringError::new("no program scripted"))
        })?;

        state.processes.push(ProcessEntry {
            pid: plan.pid,
            parent_pid: 1,
            exe_name: plan.exe_name.clone(),
        });
        state.processes.extend(plan.children.iter().cloned());
        if let Some((handle, pid, rect)) = plan.window {
            let at = state.polls + plan.appear_after_polls;
            state.pending.push((
                at,
                FakeWindow {
                    handle: WindowHandle(handle),
                    pid,
                    rect,
                    maximized: false,
                    visible: true,
                    main_style: true,
                },
            ));
        }
        Ok(plan.pid)
    }
}
