//! Moving a window onto its target monitor

use crate::config::Preferences;
use crate::display::MonitorHandle;
use crate::error::Result;
use crate::placement::{PlacementMode, normal_rect, park_rect};
use crate::window::{ShowCommand, WindowHandle, WindowSystem};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Place `window` on `monitor` using `mode`
///
/// Steps:
/// 1. Bring the window to normal state so `SetWindowPos` is honored
///    (a maximized window is restored and given `restore_settle_ms`).
/// 2. `Normal`: move to the work area's top-left corner keeping the size.
/// 3. `Maximize`/`WorkArea`: park the window fully inside the target work
///    area, wait `park_settle_ms`, then maximize or cover the work area.
pub fn place_window(
    system: &dyn WindowSystem,
    window: WindowHandle,
    monitor: MonitorHandle,
    mode: PlacementMode,
    prefs: &Preferences,
) -> Result<()> {
    if system.is_maximized(window) {
        system.show(window, ShowCommand::Restore)?;
        thread::sleep(Duration::from_millis(prefs.restore_settle_ms));
    } else {
        system.show(window, ShowCommand::Normal)?;
    }

    let work_area = system.work_area(monitor);

    if mode == PlacementMode::Normal {
        let target = normal_rect(work_area, system.window_rect(window));
        debug!("Moving {:?} to {:?} (normal)", window, target);
        system.set_bounds(window, target)?;
        return Ok(());
    }

    let park = park_rect(work_area);
    debug!("Parking {:?} at {:?}", window, park);
    system.set_bounds(window, park)?;
    thread::sleep(Duration::from_millis(prefs.park_settle_ms));

    if mode == PlacementMode::Maximize {
        system.show(window, ShowCommand::Maximize)?;
    } else {
        system.set_bounds(window, work_area)?;
    }

    info!("Placed {:?} on monitor {:?} ({})", window, monitor, mode);
    Ok(())
}
