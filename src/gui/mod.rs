//! GUI module
//!
//! Slint main window, monitor number overlays and native dialogs.

pub mod dialogs;
pub mod gui_controller;
pub mod overlay;

pub use gui_controller::GuiController;
