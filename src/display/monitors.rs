//! Monitor enumeration
//!
//! Monitors are numbered in spatial order (left to right, then top to bottom)
//! so that "monitor 1" in a shortcut keeps meaning the same physical screen as
//! long as the desk layout does not change.

use crate::display::Rect;
use crate::error::{LaunchError, Result};

#[cfg(windows)]
use tracing::debug;
use tracing::warn;

/// Opaque OS identity of a monitor (an `HMONITOR` value on Windows)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MonitorHandle(pub isize);

/// A display monitor with its full bounds and its work area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitor {
    /// 0-based position in spatial order
    pub index: usize,
    /// OS monitor handle
    pub handle: MonitorHandle,
    /// Full monitor rectangle
    pub bounds: Rect,
    /// Monitor rectangle minus taskbars and docked toolbars
    pub work_area: Rect,
}

impl Monitor {
    /// Label shown in the monitor picker, e.g. `0: 1920×1080 @ (0,0)`
    pub fn label(&self) -> String {
        format!(
            "{}: {}×{} @ ({},{})",
            self.index,
            self.bounds.width(),
            self.bounds.height(),
            self.bounds.left,
            self.bounds.top
        )
    }
}

/// Sort monitors by `(left, top)` and renumber them in that order
pub fn sort_spatially(mut monitors: Vec<Monitor>) -> Vec<Monitor> {
    monitors.sort_by_key(|m| (m.bounds.left, m.bounds.top));
    for (index, monitor) in monitors.iter_mut().enumerate() {
        monitor.index = index;
    }
    monitors
}

/// Pick the monitor at `index`
pub fn select_monitor(monitors: &[Monitor], index: usize) -> Result<&Monitor> {
    if monitors.is_empty() {
        return Err(LaunchError::NoMonitors);
    }
    monitors.get(index).ok_or(LaunchError::MonitorOutOfRange {
        index,
        count: monitors.len(),
    })
}

/// Enumerate all attached monitors in spatial order
pub fn enumerate_monitors() -> Result<Vec<Monitor>> {
    #[cfg(windows)]
    {
        let monitors = build_monitor_list(
            win32::enumerate()?,
            |handle| win32::monitor_rects(handle).map(|(_, work)| work),
            win32::primary_work_area,
        );
        debug!("Enumerated {} monitor(s)", monitors.len());
        if monitors.is_empty() {
            return Err(LaunchError::NoMonitors);
        }
        Ok(monitors)
    }

    #[cfg(not(windows))]
    {
        Err(LaunchError::PlatformUnsupported("Monitor enumeration"))
    }
}

/// Turn enumerated `(handle, bounds)` pairs into numbered monitors
///
/// Bounds come from the enumeration itself. A monitor whose work area cannot
/// be queried gets `fallback_work_area()` and keeps its place, so the indices
/// of the monitors to its right do not shift.
pub fn build_monitor_list(
    found: Vec<(MonitorHandle, Rect)>,
    work_area: impl Fn(MonitorHandle) -> Option<Rect>,
    fallback_work_area: impl Fn() -> Rect,
) -> Vec<Monitor> {
    let monitors = found
        .into_iter()
        .map(|(handle, bounds)| {
            let work_area = work_area(handle).unwrap_or_else(|| {
                warn!("GetMonitorInfoW failed for {:?}, using primary work area", handle);
                fallback_work_area()
            });
            Monitor {
                index: 0,
                handle,
                bounds,
                work_area,
            }
        })
        .collect();
    sort_spatially(monitors)
}

/// Work area of a monitor, with the fallbacks used when the monitor query fails
///
/// Order: the monitor's own work area, the primary work area, the primary
/// screen size.
pub fn work_area_of(handle: MonitorHandle) -> Rect {
    #[cfg(windows)]
    {
        if let Some((_, work)) = win32::monitor_rects(handle) {
            return work;
        }
        warn!("GetMonitorInfoW failed for {:?}, using primary work area", handle);
        win32::primary_work_area()
    }

    #[cfg(not(windows))]
    {
        let _ = handle;
        Rect::default()
    }
}

#[cfg(windows)]
mod win32 {
    use super::MonitorHandle;
    use crate::display::Rect;
    use crate::error::{LaunchError, Result, StringError};
    use std::ffi::c_void;
    use windows::Win32::Foundation::{LPARAM, RECT};
    use windows::Win32::Graphics::Gdi::{
        EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO,
    };
    use windows::Win32::UI::WindowsAndMessaging::{
        GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN, SPI_GETWORKAREA,
        SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS, SystemParametersInfoW,
    };
    use windows::core::BOOL;

    fn to_rect(r: RECT) -> Rect {
        Rect::new(r.left, r.top, r.right, r.bottom)
    }

    /// Enumerate monitors in OS order with the bounds the OS reports for each
    ///
    /// # Safety
    ///
    /// The callback only runs during `EnumDisplayMonitors`, while `found` is
    /// alive on this stack frame; the `LPARAM` carries a pointer to it.
    #[expect(
        unsafe_code,
        reason = "Windows FFI for EnumDisplayMonitors with a stack-owned collector"
    )]
    pub(super) fn enumerate() -> Result<Vec<(MonitorHandle, Rect)>> {
        unsafe extern "system" fn collect(
            hmonitor: HMONITOR,
            _hdc: HDC,
            bounds: *mut RECT,
            data: LPARAM,
        ) -> BOOL {
            let found = unsafe { &mut *(data.0 as *mut Vec<(MonitorHandle, Rect)>) };
            if let Some(bounds) = unsafe { bounds.as_ref() } {
                found.push((MonitorHandle(hmonitor.0 as isize), to_rect(*bounds)));
            }
            BOOL::from(true)
        }

        let mut found: Vec<(MonitorHandle, Rect)> = Vec::new();
        let ok = unsafe {
            EnumDisplayMonitors(
                None,
                None,
                Some(collect),
                LPARAM(&raw mut found as isize),
            )
        };
        if !ok.as_bool() {
            return Err(LaunchError::PlacementFailed(StringError::new(
                "EnumDisplayMonitors failed",
            )));
        }

        Ok(found)
    }

    /// Full and work rectangles of a monitor
    #[expect(unsafe_code, reason = "Windows FFI for GetMonitorInfoW")]
    pub(super) fn monitor_rects(handle: MonitorHandle) -> Option<(Rect, Rect)> {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "size_of::<MONITORINFO>() is a compile-time constant that fits in u32"
        )]
        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        let hmonitor = HMONITOR(handle.0 as *mut c_void);
        let ok = unsafe { GetMonitorInfoW(hmonitor, &raw mut info) };
        ok.as_bool()
            .then(|| (to_rect(info.rcMonitor), to_rect(info.rcWork)))
    }

    /// Primary work area, or the primary screen when even that fails
    #[expect(
        unsafe_code,
        reason = "Windows FFI for SystemParametersInfoW and GetSystemMetrics"
    )]
    pub(super) fn primary_work_area() -> Rect {
        let mut rect = RECT::default();
        let queried = unsafe {
            SystemParametersInfoW(
                SPI_GETWORKAREA,
                0,
                Some((&raw mut rect).cast::<c_void>()),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
        };
        if queried.is_ok() {
            return to_rect(rect);
        }
        let (width, height) =
            unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
        Rect::new(0, 0, width, height)
    }
}
