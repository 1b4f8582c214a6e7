//! GUI controller
//!
//! Wires the Slint `MainWindow` to the library: fills the pickers, validates
//! input, runs launches on a worker thread and writes shortcuts. Slint state
//! lives on the UI thread; the worker reports back through
//! `Weak::upgrade_in_event_loop`.

use crate::MainWindow;
use crate::gui::dialogs;
use crate::gui::overlay::MonitorOverlays;
use anyhow::{Context, Result};
use launchonplease::config::{AppConfig, ConfigManager, MAX_OBSERVE_SECS, WindowState};
use launchonplease::display::{Monitor, enumerate_monitors};
use launchonplease::error::get_user_friendly_error;
use launchonplease::launcher::{
    LaunchProgress, LaunchRequest, LaunchSession, normalize_path_input, resolve_program_path,
};
use launchonplease::placement::PlacementMode;
use launchonplease::shortcut::{ShortcutSpec, create_desktop_shortcut};
use parking_lot::Mutex;
use slint::{
    CloseRequestResponse, ComponentHandle, ModelRc, PhysicalPosition, PhysicalSize,
    SharedString, VecModel,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Shown when the program path does not point to a file
pub const INVALID_EXE_MESSAGE: &str = "Please select a valid .exe file.";
/// Shown when no monitor is selected
pub const NO_MONITOR_MESSAGE: &str = "Please select a monitor.";
/// Shown after a successful launch
pub const LAUNCH_SUCCESS_MESSAGE: &str = "Launched and placed successfully.";

/// UI-thread state shared by the callbacks
struct UiState {
    monitors: RefCell<Vec<Monitor>>,
    overlays: MonitorOverlays,
}

/// GUI controller for the launcher window
pub struct GuiController {
    main_window: MainWindow,
    config: Arc<Mutex<AppConfig>>,
    state: Rc<UiState>,
}

impl GuiController {
    /// Create the main window and restore the last launch into it
    pub fn new(config: AppConfig) -> Result<Self> {
        let main_window = MainWindow::new().context("Failed to create main window")?;

        let controller = Self {
            main_window,
            config: Arc::new(Mutex::new(config)),
            state: Rc::new(UiState {
                monitors: RefCell::new(Vec::new()),
                overlays: MonitorOverlays::default(),
            }),
        };

        controller.populate();
        controller.setup_callbacks();
        Ok(controller)
    }

    /// Show the window and run the Slint event loop until it closes
    pub fn run(self) -> Result<()> {
        self.main_window
            .run()
            .context("Slint event loop terminated with error")
    }

    /// Fill every control from the config and the current monitors
    fn populate(&self) {
        let config = self.config.lock().clone();
        let ui = &self.main_window;

        let mode_labels: Vec<SharedString> = PlacementMode::ALL
            .iter()
            .map(|mode| SharedString::from(mode.label()))
            .collect();
        ui.set_mode_labels(ModelRc::new(VecModel::from(mode_labels)));
        ui.set_max_observe_secs(to_i32(MAX_OBSERVE_SECS));

        let last = &config.last_launch;
        if let Some(exe) = &last.exe_path {
            ui.set_exe_path(exe.to_string_lossy().as_ref().into());
        }
        ui.set_mode_index(to_i32(last.mode.index()));
        ui.set_observe_secs(to_i32(last.observe_secs.min(MAX_OBSERVE_SECS)));

        refresh_monitors(ui, &self.state, Some(last.monitor_index));

        let window_state = &config.window_state;
        ui.window()
            .set_size(PhysicalSize::new(window_state.width, window_state.height));
        ui.window()
            .set_position(PhysicalPosition::new(window_state.x, window_state.y));
    }

    fn setup_callbacks(&self) {
        let ui = &self.main_window;

        let weak = ui.as_weak();
        let start_dir = Arc::clone(&self.config);
        ui.on_browse_clicked(move || {
            let Some(ui) = weak.upgrade() else { return };
            let current = normalize_path_input(&ui.get_exe_path());
            let dir = current
                .parent()
                .filter(|p| p.is_dir())
                .map(std::path::Path::to_path_buf)
                .or_else(|| {
                    start_dir
                        .lock()
                        .last_launch
                        .exe_path
                        .as_ref()
                        .and_then(|p| p.parent().map(std::path::Path::to_path_buf))
                });
            if let Some(path) = dialogs::pick_program(dir) {
                ui.set_exe_path(path.to_string_lossy().as_ref().into());
            }
        });

        let weak = ui.as_weak();
        let state = Rc::clone(&self.state);
        let config = Arc::clone(&self.config);
        ui.on_show_numbers_clicked(move || {
            let Some(ui) = weak.upgrade() else { return };
            refresh_monitors(&ui, &state, None);
            let duration = Duration::from_millis(config.lock().preferences.overlay_duration_ms);
            let monitors = state.monitors.borrow();
            if let Err(e) = state.overlays.show(&monitors, duration) {
                warn!("Failed to show monitor overlays: {}", e);
            }
        });

        let weak = ui.as_weak();
        let state = Rc::clone(&self.state);
        let config = Arc::clone(&self.config);
        ui.on_launch_clicked(move || {
            let Some(ui) = weak.upgrade() else { return };
            match read_request(&ui, &state) {
                Ok(request) => start_launch(&ui, &config, request),
                Err(message) => dialogs::show_error(message),
            }
        });

        let weak = ui.as_weak();
        let state = Rc::clone(&self.state);
        let config = Arc::clone(&self.config);
        ui.on_shortcut_clicked(move || {
            let Some(ui) = weak.upgrade() else { return };
            match read_request(&ui, &state) {
                Ok(request) => create_shortcut(&config, &request),
                Err(message) => dialogs::show_error(message),
            }
        });

        let weak = ui.as_weak();
        let state = Rc::clone(&self.state);
        let config = Arc::clone(&self.config);
        ui.window().on_close_requested(move || {
            state.overlays.dismiss();
            if let Some(ui) = weak.upgrade() {
                let size = ui.window().size();
                let position = ui.window().position();
                let mut config = config.lock();
                config.window_state = WindowState {
                    x: position.x,
                    y: position.y,
                    width: size.width,
                    height: size.height,
                };
                if let Err(e) = ConfigManager::save(&config) {
                    warn!("Failed to save window state: {}", e);
                }
            }
            CloseRequestResponse::HideWindow
        });
    }
}

fn to_i32(value: impl TryInto<i32>) -> i32 {
    value.try_into().unwrap_or(i32::MAX)
}

/// Re-enumerate monitors and rebuild the picker
///
/// `preferred` selects an index after a fresh start; otherwise the current
/// selection is kept when it still exists.
fn refresh_monitors(ui: &MainWindow, state: &UiState, preferred: Option<usize>) {
    let monitors = enumerate_monitors().unwrap_or_else(|e| {
        warn!("Monitor enumeration failed: {}", e);
        ui.set_status_text(get_user_friendly_error(&e).into());
        Vec::new()
    });

    let labels: Vec<SharedString> = monitors.iter().map(|m| m.label().into()).collect();
    ui.set_monitor_labels(ModelRc::new(VecModel::from(labels)));

    let wanted = preferred.or_else(|| usize::try_from(ui.get_monitor_index()).ok());
    let selected = match wanted {
        Some(index) if index < monitors.len() => to_i32(index),
        _ if monitors.is_empty() => -1,
        _ => 0,
    };
    ui.set_monitor_index(selected);

    *state.monitors.borrow_mut() = monitors;
}

/// Validate the form into a launch request
pub fn build_request(
    path_text: &str,
    monitor_index: i32,
    monitor_count: usize,
    mode_index: i32,
    observe_secs: i32,
) -> std::result::Result<LaunchRequest, &'static str> {
    let exe_path = resolve_program_path(path_text);
    let monitor_index = usize::try_from(monitor_index)
        .ok()
        .filter(|&index| index < monitor_count)
        .ok_or(NO_MONITOR_MESSAGE)?;
    let mode = PlacementMode::from_index(usize::try_from(mode_index).unwrap_or(0));
    let observe_secs = u32::try_from(observe_secs).unwrap_or(0);

    let request = LaunchRequest::new(exe_path, monitor_index, mode, observe_secs).with_gui_limits();
    request.validate().map_err(|_| INVALID_EXE_MESSAGE)?;
    Ok(request)
}

fn read_request(ui: &MainWindow, state: &UiState) -> std::result::Result<LaunchRequest, &'static str> {
    // Path first, so an empty form complains about the program
    let path_text = ui.get_exe_path();
    if !resolve_program_path(&path_text).is_file() {
        return Err(INVALID_EXE_MESSAGE);
    }
    build_request(
        &path_text,
        ui.get_monitor_index(),
        state.monitors.borrow().len(),
        ui.get_mode_index(),
        ui.get_observe_secs(),
    )
}

/// Status line text for a progress step
pub fn progress_text(progress: &LaunchProgress) -> String {
    match progress {
        LaunchProgress::Spawned { pid } => format!("Started (pid {pid}), waiting for its window…"),
        LaunchProgress::WindowFound(_) => "Window found, moving it…".to_string(),
        LaunchProgress::Placed => "Placed, watching for it to wander off…".to_string(),
        LaunchProgress::Corrected { count } => format!("Put back on the monitor ({count}×)"),
        LaunchProgress::Finished => "Done.".to_string(),
    }
}

/// Store `request` as the last launch and save the config
fn remember(config: &Mutex<AppConfig>, request: &LaunchRequest) {
    let mut config = config.lock();
    config.last_launch = request.to_last_launch();
    if let Err(e) = ConfigManager::save(&config) {
        warn!("Failed to save last launch: {}", e);
    }
}

/// Run the launch on a worker thread, buttons disabled until it ends
fn start_launch(ui: &MainWindow, config: &Arc<Mutex<AppConfig>>, request: LaunchRequest) {
    ui.set_busy(true);
    ui.set_status_text("Launching…".into());

    let prefs = config.lock().preferences.clone();
    let config = Arc::clone(config);
    let weak = ui.as_weak();

    let spawned = std::thread::Builder::new()
        .name("launch".to_string())
        .spawn(move || {
            let status = weak.clone();
            let observer = move |progress: &LaunchProgress| {
                let text = progress_text(progress);
                if let Err(e) =
                    status.upgrade_in_event_loop(move |ui| ui.set_status_text(text.into()))
                {
                    warn!("Status update dropped: {}", e);
                }
            };

            let result = LaunchSession::native(prefs).and_then(|session| session.run(&request, &observer));
            match &result {
                Ok(outcome) => {
                    info!(
                        "Launch finished: pid {} on monitor {} ({} correction(s))",
                        outcome.pid, outcome.monitor_index, outcome.corrections
                    );
                    remember(&config, &request);
                }
                Err(e) => error!("Launch failed: {}", e),
            }

            let message = result
                .as_ref()
                .map(|_| LAUNCH_SUCCESS_MESSAGE.to_string())
                .map_err(get_user_friendly_error);
            if let Err(e) = weak.upgrade_in_event_loop(move |ui| {
                ui.set_busy(false);
                match message {
                    Ok(text) => {
                        ui.set_status_text(text.as_str().into());
                        dialogs::show_info(&text);
                    }
                    Err(text) => {
                        ui.set_status_text("Launch failed.".into());
                        dialogs::show_error(&text);
                    }
                }
            }) {
                warn!("Launch result dropped, event loop gone: {}", e);
            }
        });

    if let Err(e) = spawned {
        error!("Failed to start launch thread: {}", e);
        ui.set_busy(false);
        dialogs::show_error(&format!("Failed to start the launch:\n{e}"));
    }
}

/// Write the desktop shortcut for `request` and report the result
fn create_shortcut(config: &Mutex<AppConfig>, request: &LaunchRequest) {
    let launcher = match std::env::current_exe() {
        Ok(path) => path,
        Err(e) => {
            dialogs::show_error(&format!("Failed to create shortcut:\n{e}"));
            return;
        }
    };

    let spec = ShortcutSpec::for_launch(&launcher, request);
    match create_desktop_shortcut(&spec) {
        Ok(path) => {
            remember(config, request);
            dialogs::show_info(&shortcut_created_text(&path));
        }
        Err(e) => {
            error!("Shortcut creation failed: {}", e);
            dialogs::show_error(&format!("Failed to create shortcut:\n{e}"));
        }
    }
}

/// Confirmation shown after a shortcut was written to `path`
pub fn shortcut_created_text(path: &std::path::Path) -> String {
    format!(
        "Shortcut created:\n{}\n\nUse that icon next time \u{2014} it launches on the selected monitor.",
        path.display()
    )
}
