//! Top-level window discovery and control
//!
//! # Overview
//!
//! - `WindowSystem`: the seam between the launch pipeline and the desktop
//! - `Win32WindowSystem`: user32-backed implementation (Windows only)
//! - `ProcessSnapshot`: process table used to follow a launched program's
//!   child processes and to match windows by executable name
//! - `candidate`: scoring that picks the launched program's main window
//!
//! # Window matching
//!
//! A window is a candidate when it is visible, carries overlapped-window
//! styling, is not a tool window, and is at least 200×150 px (configurable).
//! Candidates score:
//!
//! | Signal                                   | Points |
//! |------------------------------------------|--------|
//! | owned by the launched process tree        | 1000   |
//! | process has the launched exe's file name  | 500    |
//! | window appeared after the launch          | 200    |
//!
//! The highest score wins, ties go to the larger window.

pub mod candidate;
pub mod process;
pub mod system;

#[cfg(windows)]
pub mod win32;

pub use candidate::{WindowQuery, best_window, pick_best_window, score};
pub use process::{ProcessEntry, ProcessSnapshot, exe_file_name, snapshot_processes};
pub use system::{ShowCommand, WindowHandle, WindowInfo, WindowSystem};

#[cfg(windows)]
pub use win32::Win32WindowSystem;
