//! `Launch on Please` - start a program on the monitor you choose
//!
//! Launches a program, finds its main window, moves it to a chosen monitor in
//! a chosen state (maximized, covering the work area, or a normal window) and
//! keeps it there for a few seconds while the program settles. Desktop
//! shortcuts created by the GUI repeat a launch headlessly.
//!
//! # Layout
//!
//! - `display`: rectangles and spatially ordered monitors
//! - `window`: the `WindowSystem` seam, process snapshots, main window scoring
//! - `placement`: restore, park and maximize/fill sequence
//! - `launcher`: spawn, discovery, waiting and the correction loop
//! - `shortcut`: `.lnk` files that call the headless mode
//! - `config`: persisted last launch and timing preferences

// Module declarations
pub mod config;
pub mod display;
pub mod error;
pub mod launcher;
pub mod placement;
pub mod shortcut;
pub mod utils;
pub mod window;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{LaunchError, Result};
