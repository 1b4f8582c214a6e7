//! Keeping a placed window where it was put

use crate::config::Preferences;
use crate::display::{MonitorHandle, rect_changed};
use crate::placement::{PlacementMode, place_window};
use crate::window::{WindowHandle, WindowSystem};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How the watch period ended
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnforceReport {
    /// Number of times the window had to be placed again
    pub corrections: u32,
    /// The window disappeared before the watch period ended
    pub window_closed: bool,
}

/// Watch `window` for `observe` and put it back whenever it leaves `monitor`
/// or its rectangle changes
///
/// Many programs restore their saved position a moment after showing their
/// window. Each poll compares the window's monitor and rectangle with the
/// previous poll; a change beyond `rect_tolerance_px` triggers a new
/// `place_window`. A failed correction is logged and retried on the next poll.
/// `on_correction` receives the running correction count.
pub fn enforce_placement(
    system: &dyn WindowSystem,
    window: WindowHandle,
    monitor: MonitorHandle,
    mode: PlacementMode,
    observe: Duration,
    prefs: &Preferences,
    on_correction: &mut dyn FnMut(u32),
) -> EnforceReport {
    let deadline = Instant::now() + observe;
    let mut report = EnforceReport::default();
    let mut last_rect = system.window_rect(window);

    while Instant::now() < deadline {
        if !system.is_window_alive(window) {
            debug!("{:?} closed during the watch period", window);
            report.window_closed = true;
            break;
        }

        let current_monitor = system.monitor_of_window(window);
        let mut current_rect = system.window_rect(window);

        if current_monitor != monitor
            || rect_changed(current_rect, last_rect, prefs.rect_tolerance_px)
        {
            debug!(
                "{:?} drifted to {:?} on {:?}, placing again",
                window, current_rect, current_monitor
            );
            match place_window(system, window, monitor, mode, prefs) {
                Ok(()) => {
                    report.corrections += 1;
                    on_correction(report.corrections);
                }
                Err(e) => warn!("Correction of {:?} failed: {}", window, e),
            }
            current_rect = system.window_rect(window);
        }

        last_rect = current_rect;
        thread::sleep(prefs.poll_interval());
    }

    if report.corrections > 0 {
        info!(
            "Corrected {:?} {} time(s) during the watch period",
            window, report.corrections
        );
    }
    report
}
