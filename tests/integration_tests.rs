#![allow(clippy::unwrap_used)]
//! Integration tests for `Launch on Please`
//!
//! Tests configuration persistence, shortcut command lines and error
//! messages across module boundaries.

use launchonplease::{
    config::{AppConfig, ConfigManager, DEFAULT_OBSERVE_SECS, MAX_OBSERVE_SECS, WindowState},
    display::{Monitor, MonitorHandle, Rect, select_monitor, sort_spatially},
    error::{LaunchError, get_user_friendly_error},
    launcher::{LaunchRequest, normalize_path_input},
    placement::PlacementMode,
    shortcut::{SHORTCUT_SUFFIX, ShortcutSpec},
};
use std::path::PathBuf;

/// Split a shortcut argument string the way the Windows command line does for
/// arguments that are either plain or wrapped in one pair of quotes
fn split_arguments(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            ' ' if !quoted => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}

/// Test that the last launch and window state survive a save and reload
#[test]
fn test_config_persistence_integration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("LaunchOnPlease").join("config.json");

    let request = LaunchRequest::new(
        "C:\\Games\\Space Sim\\sim.exe",
        2,
        PlacementMode::WorkArea,
        20,
    );
    let mut config = AppConfig::default();
    config.last_launch = request.to_last_launch();
    config.window_state = WindowState {
        x: -1500,
        y: 300,
        width: 640,
        height: 360,
    };

    ConfigManager::save_to(&config, &path).unwrap();
    let loaded = ConfigManager::load_from(&path).unwrap();

    assert_eq!(loaded.last_launch, config.last_launch);
    assert_eq!(loaded.window_state, config.window_state);
    assert_eq!(loaded.preferences, config.preferences);
}

/// Test that a file written by an older version keeps its values and gains defaults
#[test]
fn test_config_partial_file_gets_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "last_launch": { "exe_path": "C:\\a.exe", "monitor_index": 1 },
             "preferences": { "poll_interval_ms": 0 } }"#,
    )
    .unwrap();

    let loaded = ConfigManager::load_from(&path).unwrap();
    assert_eq!(loaded.last_launch.exe_path, Some(PathBuf::from("C:\\a.exe")));
    assert_eq!(loaded.last_launch.monitor_index, 1);
    assert_eq!(loaded.last_launch.mode, PlacementMode::Maximize);
    assert_eq!(loaded.last_launch.observe_secs, DEFAULT_OBSERVE_SECS);
    // A zero poll interval is pulled back to the minimum
    assert_eq!(loaded.preferences.poll_interval_ms, 1);
}

/// Test that a corrupt file never blocks a launch
#[test]
fn test_corrupt_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let loaded = ConfigManager::load_from(&path).unwrap();
    assert_eq!(loaded.last_launch.exe_path, None);
    assert_eq!(loaded.preferences, AppConfig::default().preferences);

    // Saving over it repairs the file
    ConfigManager::save_to(&loaded, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok());
}

/// Test that a shortcut's arguments describe the same launch the GUI set up
#[test]
fn test_shortcut_arguments_reproduce_request() {
    let request = LaunchRequest::new(
        "C:\\Program Files\\Space Sim\\sim.exe",
        1,
        PlacementMode::Normal,
        MAX_OBSERVE_SECS + 5,
    )
    .with_gui_limits();
    let shortcut = ShortcutSpec::for_launch(&PathBuf::from("C:\\Tools\\launchonplease.exe"), &request);

    assert_eq!(shortcut.name, format!("sim{SHORTCUT_SUFFIX}"));
    assert_eq!(shortcut.file_name(), "sim - LOP.lnk");
    assert_eq!(shortcut.target, PathBuf::from("C:\\Tools\\launchonplease.exe"));

    let args = split_arguments(&shortcut.arguments);
    assert_eq!(
        args,
        vec![
            "--exe",
            "C:\\Program Files\\Space Sim\\sim.exe",
            "--monitor",
            "1",
            "--mode",
            "normal",
            "--observe",
            MAX_OBSERVE_SECS.to_string().as_str(),
        ]
    );
    assert_eq!(normalize_path_input(&args[1]), request.exe_path);
    assert_eq!(args[5].parse::<PlacementMode>().unwrap(), request.mode);
}

/// Test that a shortcut made for a monitor that was later unplugged fails cleanly
#[test]
fn test_unplugged_monitor_error_message() {
    let monitors = sort_spatially(vec![
        Monitor {
            index: 0,
            handle: MonitorHandle(1),
            bounds: Rect::new(0, 0, 1920, 1080),
            work_area: Rect::new(0, 0, 1920, 1040),
        },
        Monitor {
            index: 0,
            handle: MonitorHandle(2),
            bounds: Rect::new(1920, 0, 3840, 1080),
            work_area: Rect::new(1920, 0, 3840, 1040),
        },
    ]);

    let err = select_monitor(&monitors, 2).unwrap_err();
    assert!(matches!(err, LaunchError::MonitorOutOfRange { index: 2, count: 2 }));
    let message = get_user_friendly_error(&err);
    assert!(message.contains("out of range"));
    assert!(message.contains("found 2"));

    let err = select_monitor(&[], 0).unwrap_err();
    assert!(matches!(err, LaunchError::NoMonitors));
}

/// Test that user-facing messages never leak Rust debug formatting
#[test]
fn test_user_friendly_errors_are_plain_text() {
    let errors = [
        LaunchError::NoMonitors,
        LaunchError::WindowNotFound,
        LaunchError::InvalidExecutable(PathBuf::from("C:\\missing.exe")),
        LaunchError::PlatformUnsupported("Creating shortcuts"),
    ];
    for err in &errors {
        let message = get_user_friendly_error(err);
        assert!(!message.is_empty());
        assert!(!message.contains("PathBuf"), "{message}");
        assert!(!message.contains("Some("), "{message}");
    }
}
