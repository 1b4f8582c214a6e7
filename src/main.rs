//! `Launch on Please` - start a program on the monitor you choose
//!
//! Without `--exe` the launcher window opens. With `--exe` (as written by the
//! desktop shortcuts) the launch runs headlessly and the process exits with
//! 0 on success, 1 on a runtime failure and 2 on invalid arguments.

// Set Windows subsystem to hide console window
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![expect(
    missing_docs,
    reason = "Slint-generated code from include_modules! lacks doc comments"
)]
#![allow(clippy::unwrap_used)] // Slint-generated code from include_modules! uses .unwrap() extensively

// GUI module is only in the binary, not the library
mod gui;

use anyhow::{Context, Result};
use clap::Parser;
use gui::GuiController;
use launchonplease::{
    config::{AppConfig, ConfigManager, DEFAULT_OBSERVE_SECS},
    display::enumerate_monitors,
    error::get_user_friendly_error,
    launcher::{LaunchProgress, LaunchRequest, LaunchSession, resolve_program_path},
    placement::PlacementMode,
    utils,
};
use std::process::ExitCode;
use tracing::{error, info, warn};

// Include Slint-generated code
slint::include_modules!();

/// Exit code for a completed launch
const EXIT_OK: u8 = 0;
/// Exit code for a failed launch
const EXIT_RUNTIME_ERROR: u8 = 1;
/// Exit code for unusable arguments (same as clap's parse errors)
const EXIT_USAGE: u8 = 2;

/// Command line of the launcher
#[derive(Debug, Parser)]
#[command(name = "launchonplease", version, about = "Launch a program on the monitor you choose")]
struct Args {
    /// Path to target program .exe
    #[arg(long)]
    exe: Option<String>,

    /// Monitor index (0-based, left to right)
    #[arg(long)]
    monitor: Option<usize>,

    /// Window state on the target monitor
    #[arg(long, value_enum, default_value_t = PlacementMode::Maximize)]
    mode: PlacementMode,

    /// Seconds to keep putting the window back after placing it
    #[arg(long, default_value_t = DEFAULT_OBSERVE_SECS)]
    observe: u32,

    /// Print the monitors with their indices and exit
    #[arg(long)]
    list_monitors: bool,
}

/// Main entry point for the application
fn main() -> ExitCode {
    let args = Args::parse();
    let headless = args.exe.is_some() || args.list_monitors;

    if let Err(e) = utils::init_logging(headless) {
        eprintln!("Logging disabled: {e}");
    }

    // Before any window or monitor query so every rectangle is physical pixels
    let awareness = utils::enable_dpi_awareness();
    info!("DPI awareness: {:?}", awareness);
    utils::set_app_user_model_id();

    if args.list_monitors {
        return ExitCode::from(list_monitors());
    }

    if let Some(exe) = args.exe.as_deref() {
        return ExitCode::from(run_headless(exe, args.monitor, args.mode, args.observe));
    }

    match run_gui() {
        Ok(()) => {
            info!("Launch on Please shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("GUI failed: {:#}", e);
            gui::dialogs::show_error(&format!("Launch on Please could not start:\n\n{e:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Load the config, falling back to defaults so a broken file never blocks a launch
fn load_config() -> AppConfig {
    ConfigManager::load().unwrap_or_else(|e| {
        warn!("Using default configuration: {}", e);
        AppConfig::default()
    })
}

/// Build the headless request, or the usage message to print
///
/// `--exe` is made absolute first; a relative path would otherwise only be
/// found by `is_file` and not by the process spawn.
fn headless_request(
    exe: &str,
    monitor: Option<usize>,
    mode: PlacementMode,
    observe: u32,
) -> std::result::Result<LaunchRequest, &'static str> {
    let exe_path = resolve_program_path(exe);
    if !exe_path.is_file() {
        return Err("Invalid --exe path.");
    }
    let monitor_index = monitor.ok_or("Missing --monitor (0-based).")?;
    Ok(LaunchRequest::new(exe_path, monitor_index, mode, observe))
}

/// Launch from the command line without opening a window, returning the exit code
fn run_headless(exe: &str, monitor: Option<usize>, mode: PlacementMode, observe: u32) -> u8 {
    let request = match headless_request(exe, monitor, mode, observe) {
        Ok(request) => request,
        Err(message) => {
            eprintln!("{message}");
            error!("{} (--exe {})", message, exe);
            return EXIT_USAGE;
        }
    };
    let prefs = load_config().preferences;

    let log_progress = |progress: &LaunchProgress| info!("{:?}", progress);
    let result =
        LaunchSession::native(prefs).and_then(|session| session.run(&request, &log_progress));
    match result {
        Ok(outcome) => {
            info!(
                "Headless launch done: pid {}, monitor {}, {} correction(s)",
                outcome.pid, outcome.monitor_index, outcome.corrections
            );
            EXIT_OK
        }
        Err(e) => {
            error!("Headless launch failed: {}", e);
            eprintln!("Error: {e}");
            EXIT_RUNTIME_ERROR
        }
    }
}

/// Print `index: WxH @ (x,y)` for every monitor, returning the exit code
fn list_monitors() -> u8 {
    match enumerate_monitors() {
        Ok(monitors) => {
            for monitor in &monitors {
                println!("{}", monitor.label());
            }
            EXIT_OK
        }
        Err(e) => {
            eprintln!("{}", get_user_friendly_error(&e));
            EXIT_RUNTIME_ERROR
        }
    }
}

/// Open the launcher window and run until it is closed
fn run_gui() -> Result<()> {
    let config = load_config();
    info!(
        "Starting GUI (last program: {:?})",
        config.last_launch.exe_path
    );
    let controller = GuiController::new(config).context("Failed to create GUI controller")?;
    controller.run()
}
