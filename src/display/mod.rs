//! Display geometry and monitor enumeration
//!
//! - `Rect`: screen rectangle with the tolerance comparison used to detect
//!   windows that moved
//! - `Monitor`: an attached display with its bounds and work area, numbered in
//!   spatial order

pub mod geometry;
pub mod monitors;

pub use geometry::{Rect, rect_changed};
pub use monitors::{
    Monitor, MonitorHandle, build_monitor_list, enumerate_monitors, select_monitor,
    sort_spatially, work_area_of,
};
