//! Window system abstraction
//!
//! The launch pipeline only talks to the desktop through `WindowSystem`, which
//! keeps window discovery, placement and the correction loop independent of
//! Win32 and lets them run against a scripted desktop in tests.

use crate::display::{Monitor, MonitorHandle, Rect};
use crate::error::Result;
use crate::window::ProcessSnapshot;

/// Opaque top-level window identity (an `HWND` value on Windows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

/// What the pipeline needs to know about a visible top-level window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Window identity
    pub handle: WindowHandle,
    /// Owning process ID
    pub pid: u32,
    /// Current outer rectangle, `None` if the window vanished mid-query
    pub rect: Option<Rect>,
    /// Has at least one of the overlapped-window style bits and is not a
    /// tool window
    pub main_style: bool,
}

/// Show state requests forwarded to the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowCommand {
    /// Restore a minimized or maximized window to its normal rectangle
    Restore,
    /// Show in normal state
    Normal,
    /// Maximize on the monitor the window currently belongs to
    Maximize,
}

/// Desktop operations used by the launcher
pub trait WindowSystem: Send + Sync {
    /// Attached monitors in spatial order
    fn monitors(&self) -> Result<Vec<Monitor>>;

    /// All visible top-level windows
    fn visible_windows(&self) -> Result<Vec<WindowInfo>>;

    /// Outer rectangle of a window, `None` if it no longer exists
    fn window_rect(&self, window: WindowHandle) -> Option<Rect>;

    /// Whether the window still exists and is visible
    fn is_window_alive(&self, window: WindowHandle) -> bool;

    /// Monitor the OS currently associates with the window
    fn monitor_of_window(&self, window: WindowHandle) -> MonitorHandle;

    /// Whether the window is maximized
    fn is_maximized(&self, window: WindowHandle) -> bool;

    /// Change the show state of a window
    fn show(&self, window: WindowHandle, command: ShowCommand) -> Result<()>;

    /// Move and resize a window without changing its z-order or activating it
    fn set_bounds(&self, window: WindowHandle, bounds: Rect) -> Result<()>;

    /// Work area of a monitor
    fn work_area(&self, monitor: MonitorHandle) -> Rect;

    /// Snapshot of running processes
    fn process_snapshot(&self) -> Result<ProcessSnapshot>;
}
