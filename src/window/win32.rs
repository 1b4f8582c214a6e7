//! Win32 implementation of `WindowSystem`
//!
//! Thin wrappers over user32; every function is a single OS call plus
//! conversion between `HWND`/`HMONITOR` and the crate's opaque handles.

use crate::display::{Monitor, MonitorHandle, Rect, enumerate_monitors, work_area_of};
use crate::error::{LaunchError, Result};
use crate::window::{ProcessSnapshot, ShowCommand, WindowHandle, WindowInfo, WindowSystem};
use std::ffi::c_void;
use tracing::{debug, warn};
use windows::Win32::Foundation::{HWND, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{MONITOR_DEFAULTTONEAREST, MonitorFromWindow};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GWL_EXSTYLE, GWL_STYLE, GetWindowLongPtrW, GetWindowRect,
    GetWindowThreadProcessId, IsWindow, IsWindowVisible, IsZoomed, SW_MAXIMIZE, SW_RESTORE,
    SW_SHOWNORMAL, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOZORDER, SetWindowPos, ShowWindow,
    WS_EX_TOOLWINDOW, WS_OVERLAPPEDWINDOW,
};
use windows::core::BOOL;

fn hwnd(window: WindowHandle) -> HWND {
    HWND(window.0 as *mut c_void)
}

/// `WindowSystem` backed by user32
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32WindowSystem;

impl Win32WindowSystem {
    /// Create the Win32 window system
    pub fn new() -> Self {
        Self
    }

    /// Whether the window has overlapped-window styling and is not a tool window
    #[expect(unsafe_code, reason = "Windows FFI for GetWindowLongPtrW")]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Window style values occupy the low 32 bits of the LONG_PTR"
    )]
    fn is_main_style(handle: HWND) -> bool {
        let (style, ex_style) = unsafe {
            (
                GetWindowLongPtrW(handle, GWL_STYLE) as u32,
                GetWindowLongPtrW(handle, GWL_EXSTYLE) as u32,
            )
        };
        let overlapped = style & WS_OVERLAPPEDWINDOW.0 != 0;
        let tool = ex_style & WS_EX_TOOLWINDOW.0 != 0;
        overlapped && !tool
    }

    #[expect(unsafe_code, reason = "Windows FFI for GetWindowRect")]
    fn rect_of(handle: HWND) -> Option<Rect> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(handle, &raw mut rect) }
            .ok()
            .map(|()| Rect::new(rect.left, rect.top, rect.right, rect.bottom))
    }

    #[expect(unsafe_code, reason = "Windows FFI for GetWindowThreadProcessId")]
    fn pid_of(handle: HWND) -> u32 {
        let mut pid = 0u32;
        unsafe {
            GetWindowThreadProcessId(handle, Some(&raw mut pid));
        }
        pid
    }
}

impl WindowSystem for Win32WindowSystem {
    fn monitors(&self) -> Result<Vec<Monitor>> {
        enumerate_monitors()
    }

    /// # Safety
    ///
    /// The `EnumWindows` callback runs synchronously while `handles` is alive;
    /// the `LPARAM` carries a pointer to it.
    #[expect(
        unsafe_code,
        reason = "Windows FFI for EnumWindows with a stack-owned collector"
    )]
    fn visible_windows(&self) -> Result<Vec<WindowInfo>> {
        unsafe extern "system" fn collect(handle: HWND, data: LPARAM) -> BOOL {
            if unsafe { IsWindowVisible(handle) }.as_bool() {
                let handles = unsafe { &mut *(data.0 as *mut Vec<HWND>) };
                handles.push(handle);
            }
            BOOL::from(true)
        }

        let mut handles: Vec<HWND> = Vec::with_capacity(64);
        unsafe { EnumWindows(Some(collect), LPARAM(&raw mut handles as isize)) }
            .map_err(|e| LaunchError::PlacementFailed(Box::new(e)))?;

        Ok(handles
            .into_iter()
            .map(|handle| WindowInfo {
                handle: WindowHandle(handle.0 as isize),
                pid: Self::pid_of(handle),
                rect: Self::rect_of(handle),
                main_style: Self::is_main_style(handle),
            })
            .collect())
    }

    fn window_rect(&self, window: WindowHandle) -> Option<Rect> {
        Self::rect_of(hwnd(window))
    }

    #[expect(unsafe_code, reason = "Windows FFI for IsWindow and IsWindowVisible")]
    fn is_window_alive(&self, window: WindowHandle) -> bool {
        let handle = hwnd(window);
        unsafe { IsWindow(Some(handle)).as_bool() && IsWindowVisible(handle).as_bool() }
    }

    #[expect(unsafe_code, reason = "Windows FFI for MonitorFromWindow")]
    fn monitor_of_window(&self, window: WindowHandle) -> MonitorHandle {
        let monitor = unsafe { MonitorFromWindow(hwnd(window), MONITOR_DEFAULTTONEAREST) };
        MonitorHandle(monitor.0 as isize)
    }

    #[expect(unsafe_code, reason = "Windows FFI for IsZoomed")]
    fn is_maximized(&self, window: WindowHandle) -> bool {
        unsafe { IsZoomed(hwnd(window)).as_bool() }
    }

    #[expect(unsafe_code, reason = "Windows FFI for ShowWindow")]
    fn show(&self, window: WindowHandle, command: ShowCommand) -> Result<()> {
        let cmd = match command {
            ShowCommand::Restore => SW_RESTORE,
            ShowCommand::Normal => SW_SHOWNORMAL,
            ShowCommand::Maximize => SW_MAXIMIZE,
        };
        // The return value is the previous visibility, not a success flag
        let _ = unsafe { ShowWindow(hwnd(window), cmd) };
        debug!("ShowWindow({:?}, {:?})", window, command);
        Ok(())
    }

    #[expect(unsafe_code, reason = "Windows FFI for SetWindowPos")]
    fn set_bounds(&self, window: WindowHandle, bounds: Rect) -> Result<()> {
        unsafe {
            SetWindowPos(
                hwnd(window),
                None,
                bounds.left,
                bounds.top,
                bounds.width(),
                bounds.height(),
                SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED,
            )
        }
        .map_err(|e| {
            warn!("SetWindowPos failed for {:?}: {}", window, e);
            LaunchError::PlacementFailed(Box::new(e))
        })
    }

    fn work_area(&self, monitor: MonitorHandle) -> Rect {
        work_area_of(monitor)
    }

    fn process_snapshot(&self) -> Result<ProcessSnapshot> {
        crate::window::snapshot_processes()
    }
}
