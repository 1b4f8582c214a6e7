//! Configuration data models
//!
//! This module defines the data structures used for application configuration.
//! Every struct is `#[serde(default)]` so older or hand-edited files load with
//! missing fields filled in.

use crate::placement::PlacementMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default number of seconds to keep correcting a window after launch
pub const DEFAULT_OBSERVE_SECS: u32 = 4;

/// Largest watch time selectable in the GUI
pub const MAX_OBSERVE_SECS: u32 = 30;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Last selection made in the GUI
    pub last_launch: LastLaunch,
    /// Placement timing and matching preferences
    pub preferences: Preferences,
    /// Window state for persistence
    pub window_state: WindowState,
}

/// The selection the user made the last time an action succeeded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastLaunch {
    /// Program that was launched or turned into a shortcut
    pub exe_path: Option<PathBuf>,
    /// 0-based monitor index in spatial order
    pub monitor_index: usize,
    /// Window state applied on the target monitor
    pub mode: PlacementMode,
    /// Seconds to keep correcting the window position
    pub observe_secs: u32,
}

/// Timing and matching knobs for the launch pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Poll interval for window discovery and correction (ms)
    pub poll_interval_ms: u64,
    /// Pixel tolerance before a window rectangle counts as moved
    pub rect_tolerance_px: i32,
    /// Overall time to wait for the program's main window (s)
    pub wait_timeout_secs: u64,
    /// Time to wait for any new window once the main search failed (s)
    pub fallback_timeout_secs: u64,
    /// Quiet period before acting when `early_move_on_detect` is off (ms)
    pub stable_ms_before_move: u64,
    /// Act on the first plausible window instead of waiting for it to settle
    pub early_move_on_detect: bool,
    /// How long the monitor number overlays stay up (ms)
    pub overlay_duration_ms: u64,
    /// Rounds of child process discovery after spawning
    pub child_discovery_rounds: u32,
    /// Smallest window width considered a main window (px)
    pub min_window_width: i32,
    /// Smallest window height considered a main window (px)
    pub min_window_height: i32,
    /// Pause after restoring a maximized window (ms)
    pub restore_settle_ms: u64,
    /// Pause after parking a window on the target monitor (ms)
    pub park_settle_ms: u64,
}

/// Window state for position and size persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowState {
    /// X position
    pub x: i32,
    /// Y position
    pub y: i32,
    /// Window width
    pub width: u32,
    /// Window height
    pub height: u32,
}

impl Default for LastLaunch {
    fn default() -> Self {
        Self {
            exe_path: None,
            monitor_index: 0,
            mode: PlacementMode::default(),
            observe_secs: DEFAULT_OBSERVE_SECS,
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            poll_interval_ms: 50,
            rect_tolerance_px: 3,
            wait_timeout_secs: 45,
            fallback_timeout_secs: 10,
            stable_ms_before_move: 400,
            early_move_on_detect: true,
            overlay_duration_ms: 2000,
            child_discovery_rounds: 15,
            min_window_width: 200,
            min_window_height: 150,
            restore_settle_ms: 50,
            park_settle_ms: 20,
        }
    }
}

impl Preferences {
    /// Clamp every value into a range the launch pipeline can work with
    ///
    /// A zero poll interval would spin a core, and negative tolerances or
    /// size limits make no sense, so hand-edited files are pulled back in.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.poll_interval_ms = self.poll_interval_ms.clamp(1, 1000);
        self.rect_tolerance_px = self.rect_tolerance_px.clamp(0, 100);
        self.wait_timeout_secs = self.wait_timeout_secs.clamp(1, 600);
        self.fallback_timeout_secs = self.fallback_timeout_secs.min(600);
        self.stable_ms_before_move = self.stable_ms_before_move.min(10_000);
        self.overlay_duration_ms = self.overlay_duration_ms.clamp(250, 30_000);
        self.child_discovery_rounds = self.child_discovery_rounds.min(200);
        self.min_window_width = self.min_window_width.max(0);
        self.min_window_height = self.min_window_height.max(0);
        self.restore_settle_ms = self.restore_settle_ms.min(2000);
        self.park_settle_ms = self.park_settle_ms.min(2000);
        self
    }

    /// Poll interval as a `Duration`
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Main window search timeout as a `Duration`
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    /// Fallback window search timeout as a `Duration`
    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_secs(self.fallback_timeout_secs)
    }
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            width: 660,
            height: 280,
        }
    }
}
