//! The complete launch: spawn, find, place, watch

use crate::config::Preferences;
use crate::display::select_monitor;
use crate::error::{LaunchError, Result};
use crate::launcher::{
    LaunchRequest, Spawner, discover_process_tree, enforce_placement, wait_for_window,
};
use crate::placement::place_window;
use crate::window::{WindowHandle, WindowQuery, WindowSystem, exe_file_name, pick_best_window};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Progress of a running launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchProgress {
    /// The program was started
    Spawned {
        /// PID of the started process
        pid: u32,
    },
    /// The program's main window was identified
    WindowFound(WindowHandle),
    /// The window was moved to the target monitor
    Placed,
    /// The window drifted and was placed again
    Corrected {
        /// Corrections so far
        count: u32,
    },
    /// The watch period ended
    Finished,
}

/// Receives `LaunchProgress` events, e.g. for a status line
pub trait LaunchObserver {
    /// Called on every progress step
    fn on_progress(&self, progress: &LaunchProgress);
}

impl<F: Fn(&LaunchProgress)> LaunchObserver for F {
    fn on_progress(&self, progress: &LaunchProgress) {
        self(progress);
    }
}

/// Result of a successful launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// PID of the started process
    pub pid: u32,
    /// Window that was placed
    pub window: WindowHandle,
    /// Monitor it was placed on
    pub monitor_index: usize,
    /// Corrections made during the watch period
    pub corrections: u32,
}

/// Runs launches against a window system and a process spawner
#[derive(Clone)]
pub struct LaunchSession {
    system: Arc<dyn WindowSystem>,
    spawner: Arc<dyn Spawner>,
    prefs: Preferences,
}

impl std::fmt::Debug for LaunchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchSession")
            .field("prefs", &self.prefs)
            .finish_non_exhaustive()
    }
}

impl LaunchSession {
    /// Create a session from explicit components
    pub fn new(system: Arc<dyn WindowSystem>, spawner: Arc<dyn Spawner>, prefs: Preferences) -> Self {
        Self {
            system,
            spawner,
            prefs: prefs.sanitized(),
        }
    }

    /// Session backed by the real desktop
    #[cfg(windows)]
    pub fn native(prefs: Preferences) -> Result<Self> {
        Ok(Self::new(
            Arc::new(crate::window::Win32WindowSystem::new()),
            Arc::new(crate::launcher::OsSpawner),
            prefs,
        ))
    }

    /// Session backed by the real desktop
    #[cfg(not(windows))]
    pub fn native(_prefs: Preferences) -> Result<Self> {
        Err(LaunchError::PlatformUnsupported("Launching on a monitor"))
    }

    /// Window system used by this session
    pub fn system(&self) -> &dyn WindowSystem {
        self.system.as_ref()
    }

    /// Launch `request.exe_path` and keep its main window on the requested
    /// monitor
    ///
    /// 1. Resolve the monitor (fails before anything is started).
    /// 2. Remember which windows already exist, then spawn the program.
    /// 3. Follow the process tree for a short while.
    /// 4. Wait up to `wait_timeout_secs` for a window matching the tree, the
    ///    exe name or "new since launch"; then up to `fallback_timeout_secs`
    ///    for any new window.
    /// 5. Place it and watch it for `observe_secs`.
    pub fn run(&self, request: &LaunchRequest, observer: &dyn LaunchObserver) -> Result<LaunchOutcome> {
        let system = self.system.as_ref();
        let prefs = &self.prefs;

        let monitors = system.monitors()?;
        let monitor = select_monitor(&monitors, request.monitor_index)?;
        info!(
            "Launching {} on monitor {} ({})",
            request.exe_path.display(),
            monitor.label(),
            request.mode
        );

        let windows_before: HashSet<WindowHandle> = system
            .visible_windows()?
            .into_iter()
            .map(|w| w.handle)
            .collect();

        let pid = self.spawner.spawn(&request.exe_path)?;
        observer.on_progress(&LaunchProgress::Spawned { pid });

        let pid_set = discover_process_tree(system, pid, prefs);
        let query = WindowQuery {
            pid_set: Some(pid_set),
            exe_name: Some(exe_file_name(&request.exe_path.to_string_lossy())),
            windows_before: Some(windows_before.clone()),
        };

        let window = wait_for_window(system, prefs, prefs.wait_timeout(), || {
            self.select(&query)
        })
        .or_else(|| {
            warn!("No window matched the launched program, accepting any new window");
            let fallback = WindowQuery::new_windows_only(windows_before);
            wait_for_window(system, prefs, prefs.fallback_timeout(), || {
                self.select(&fallback)
            })
        })
        .ok_or(LaunchError::WindowNotFound)?;
        observer.on_progress(&LaunchProgress::WindowFound(window));

        place_window(system, window, monitor.handle, request.mode, prefs)?;
        observer.on_progress(&LaunchProgress::Placed);

        let report = enforce_placement(
            system,
            window,
            monitor.handle,
            request.mode,
            request.observe(),
            prefs,
            &mut |count| observer.on_progress(&LaunchProgress::Corrected { count }),
        );
        observer.on_progress(&LaunchProgress::Finished);

        Ok(LaunchOutcome {
            pid,
            window,
            monitor_index: monitor.index,
            corrections: report.corrections,
        })
    }

    fn select(&self, query: &WindowQuery) -> Option<WindowHandle> {
        pick_best_window(self.system.as_ref(), query, &self.prefs).unwrap_or_else(|e| {
            warn!("Window enumeration failed: {}", e);
            None
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{MonitorHandle, Rect};
    use crate::placement::PlacementMode;
    use crate::test_utils::{FakeDesktop, FakeReaction, SpawnPlan, fast_prefs};
    use crate::window::ProcessEntry;
    use parking_lot::Mutex;

    const LEFT: MonitorHandle = MonitorHandle(1);
    const RIGHT: MonitorHandle = MonitorHandle(2);
    const SAVED_POS: Rect = Rect::from_origin_size(100, 100, 800, 600);

    fn desktop() -> Arc<FakeDesktop> {
        let desktop = Arc::new(FakeDesktop::new());
        // Added right-to-left to check that indices follow spatial order
        desktop.add_monitor(RIGHT, Rect::new(1920, 0, 3840, 1080), Rect::new(1920, 0, 3840, 1040));
        desktop.add_monitor(LEFT, Rect::new(0, 0, 1920, 1080), Rect::new(0, 0, 1920, 1040));
        desktop
    }

    fn session(desktop: &Arc<FakeDesktop>) -> LaunchSession {
        LaunchSession::new(desktop.clone(), desktop.clone(), fast_prefs())
    }

    fn plan(window: Option<(isize, u32, Rect)>) -> SpawnPlan {
        SpawnPlan {
            pid: 500,
            exe_name: "app.exe".to_string(),
            children: Vec::new(),
            window,
            appear_after_polls: 3,
        }
    }

    fn request(monitor_index: usize, observe_secs: u32) -> LaunchRequest {
        LaunchRequest::new("C:\\Apps\\app.exe", monitor_index, PlacementMode::Maximize, observe_secs)
    }

    #[test]
    fn test_run_places_window_on_requested_monitor() {
        let desktop = desktop();
        desktop.plan_spawn(plan(Some((42, 500, SAVED_POS))));

        let events = Mutex::new(Vec::new());
        let outcome = session(&desktop)
            .run(&request(1, 0), &|p: &LaunchProgress| events.lock().push(p.clone()))
            .unwrap();

        assert_eq!(outcome.pid, 500);
        assert_eq!(outcome.window, WindowHandle(42));
        assert_eq!(outcome.monitor_index, 1);
        assert_eq!(desktop.monitor_of(WindowHandle(42)), RIGHT);
        assert_eq!(
            events.into_inner(),
            vec![
                LaunchProgress::Spawned { pid: 500 },
                LaunchProgress::WindowFound(WindowHandle(42)),
                LaunchProgress::Placed,
                LaunchProgress::Finished,
            ]
        );
    }

    #[test]
    fn test_run_prefers_child_process_window_over_other_new_windows() {
        let desktop = desktop();
        // A bigger window of another program is already open
        desktop.add_process(900, 1, "chat.exe");
        let mut spawn = plan(Some((43, 501, SAVED_POS)));
        spawn.children = vec![ProcessEntry {
            pid: 501,
            parent_pid: 500,
            exe_name: "app-helper.exe".to_string(),
        }];
        spawn.appear_after_polls = 0;
        desktop.plan_spawn(spawn);
        desktop.add_window(77, 900, Rect::new(1920, 0, 3840, 1040));

        let outcome = session(&desktop).run(&request(0, 0), &|_: &LaunchProgress| {}).unwrap();
        assert_eq!(outcome.window, WindowHandle(43));
    }

    #[test]
    fn test_run_skips_tool_window_of_launched_process() {
        let desktop = desktop();
        desktop.plan_spawn(plan(Some((44, 500, SAVED_POS))));
        // Larger and owned by the same PID, but a floating palette
        let palette = desktop.add_tool_window(70, 500, Rect::new(0, 0, 1900, 1000));

        let outcome = session(&desktop).run(&request(1, 0), &|_: &LaunchProgress| {}).unwrap();
        assert_eq!(outcome.window, WindowHandle(44));
        assert_eq!(desktop.monitor_of(palette), LEFT);
    }

    #[test]
    fn test_run_reports_corrections() {
        let desktop = desktop();
        desktop.plan_spawn(plan(Some((42, 500, SAVED_POS))));
        desktop.react_after_placement(WindowHandle(42), FakeReaction::MoveTo(SAVED_POS), 1);

        let events = Mutex::new(Vec::new());
        let outcome = session(&desktop)
            .run(&request(1, 1), &|p: &LaunchProgress| events.lock().push(p.clone()))
            .unwrap();

        assert_eq!(outcome.corrections, 1);
        assert!(events.lock().contains(&LaunchProgress::Corrected { count: 1 }));
        assert_eq!(desktop.monitor_of(WindowHandle(42)), RIGHT);
    }

    #[test]
    fn test_run_rejects_unknown_monitor_before_spawning() {
        let desktop = desktop();
        desktop.plan_spawn(plan(Some((42, 500, SAVED_POS))));

        let result = session(&desktop).run(&request(5, 0), &|_: &LaunchProgress| {});
        assert!(matches!(
            result,
            Err(LaunchError::MonitorOutOfRange { index: 5, count: 2 })
        ));
        assert!(desktop.spawned().is_empty());
    }

    #[test]
    fn test_run_without_window_fails() {
        let desktop = desktop();
        desktop.plan_spawn(plan(None));

        let result = session(&desktop).run(&request(0, 0), &|_: &LaunchProgress| {});
        assert!(matches!(result, Err(LaunchError::WindowNotFound)));
    }

    #[test]
    fn test_run_propagates_spawn_failure() {
        let desktop = desktop();

        let result = session(&desktop).run(&request(0, 0), &|_: &LaunchProgress| {});
        assert!(matches!(result, Err(LaunchError::ProcessError(_))));
        assert_eq!(desktop.spawned().len(), 1);
    }
}
