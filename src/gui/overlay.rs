//! Monitor number overlays
//!
//! One borderless, always-on-top `MonitorOverlay` per monitor, covering its
//! full bounds. Clicking any overlay or the timer running out closes all of
//! them; showing them again replaces the current set.

use crate::MonitorOverlay;
use launchonplease::display::Monitor;
use slint::{ComponentHandle, PhysicalPosition, PhysicalSize, Timer, TimerMode};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::{debug, warn};

type OverlayList = RefCell<Vec<MonitorOverlay>>;

/// The overlays currently on screen
#[derive(Default)]
pub struct MonitorOverlays {
    shown: Rc<OverlayList>,
    timer: Timer,
}

impl MonitorOverlays {
    /// Show one overlay per monitor for `duration`
    pub fn show(&self, monitors: &[Monitor], duration: Duration) -> Result<(), slint::PlatformError> {
        self.dismiss();

        for monitor in monitors {
            let overlay = MonitorOverlay::new()?;
            overlay.set_number(i32::try_from(monitor.index).unwrap_or(i32::MAX));

            let list = Rc::downgrade(&self.shown);
            overlay.on_dismiss(move || close_weak(&list));

            let bounds = monitor.bounds;
            let window = overlay.window();
            window.set_size(PhysicalSize::new(
                u32::try_from(bounds.width()).unwrap_or(0),
                u32::try_from(bounds.height()).unwrap_or(0),
            ));
            overlay.show()?;
            // Positioned after show so the window manager cannot move it
            window.set_position(PhysicalPosition::new(bounds.left, bounds.top));

            self.shown.borrow_mut().push(overlay);
        }
        debug!("Showing {} monitor overlay(s)", monitors.len());

        let list = Rc::downgrade(&self.shown);
        self.timer
            .start(TimerMode::SingleShot, duration, move || close_weak(&list));
        Ok(())
    }

    /// Close every overlay now
    pub fn dismiss(&self) {
        self.timer.stop();
        close_all(&self.shown);
    }
}

fn close_weak(list: &Weak<OverlayList>) {
    if let Some(list) = list.upgrade() {
        close_all(&list);
    }
}

fn close_all(list: &OverlayList) {
    // Taken out first: hiding may re-enter through the dismiss callback
    let overlays = std::mem::take(&mut *list.borrow_mut());
    for overlay in overlays {
        if let Err(e) = overlay.hide() {
            warn!("Failed to hide monitor overlay: {}", e);
        }
    }
}
