//! Process-wide Windows settings applied once at startup
//!
//! Window rectangles, work areas and monitor bounds must all be physical
//! pixels, otherwise placement on a scaled monitor lands in the wrong spot.

/// AppUserModelID so the taskbar groups launcher windows under one icon
pub const APP_USER_MODEL_ID: &str = "ToxicOrca.LaunchOnPlease";

/// How much DPI awareness the process ended up with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpiAwareness {
    /// Per-monitor v2 (Windows 10 1703+)
    PerMonitorV2,
    /// Per-monitor v1 (Windows 8.1+)
    PerMonitor,
    /// System DPI aware
    System,
    /// Nothing could be set
    Unaware,
}

/// Make coordinates physical pixels, trying the newest API first
#[cfg(windows)]
#[expect(unsafe_code, reason = "Windows FFI for the DPI awareness APIs")]
pub fn enable_dpi_awareness() -> DpiAwareness {
    use windows::Win32::UI::HiDpi::{
        DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, PROCESS_PER_MONITOR_DPI_AWARE,
        SetProcessDpiAwareness, SetProcessDpiAwarenessContext,
    };
    use windows::Win32::UI::WindowsAndMessaging::SetProcessDPIAware;

    let awareness =
        if unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) }
            .is_ok()
        {
            DpiAwareness::PerMonitorV2
        } else if unsafe { SetProcessDpiAwareness(PROCESS_PER_MONITOR_DPI_AWARE) }.is_ok() {
            DpiAwareness::PerMonitor
        } else if unsafe { SetProcessDPIAware() }.as_bool() {
            DpiAwareness::System
        } else {
            DpiAwareness::Unaware
        };
    tracing::debug!("DPI awareness: {:?}", awareness);
    awareness
}

/// Make coordinates physical pixels (no-op off Windows)
#[cfg(not(windows))]
pub fn enable_dpi_awareness() -> DpiAwareness {
    DpiAwareness::Unaware
}

/// Register `APP_USER_MODEL_ID` for this process
#[cfg(windows)]
#[expect(
    unsafe_code,
    reason = "Windows FFI for SetCurrentProcessExplicitAppUserModelID"
)]
pub fn set_app_user_model_id() {
    use windows::Win32::UI::Shell::SetCurrentProcessExplicitAppUserModelID;
    use windows::core::HSTRING;

    if let Err(e) = unsafe { SetCurrentProcessExplicitAppUserModelID(&HSTRING::from(APP_USER_MODEL_ID)) } {
        tracing::warn!("Failed to set AppUserModelID: {}", e);
    }
}

/// Register `APP_USER_MODEL_ID` for this process (no-op off Windows)
#[cfg(not(windows))]
pub fn set_app_user_model_id() {}
