//! Desktop shortcuts that launch a program on a chosen monitor
//!
//! A shortcut runs this launcher headlessly (`--exe --monitor --mode
//! --observe`) but carries the target program's name and icon.

pub mod definition;
pub mod link;

pub use definition::{
    IconLocation, SHORTCUT_SUFFIX, ShortcutSpec, join_arguments, launcher_arguments,
    shortcut_name_for,
};
pub use link::{create_desktop_shortcut, desktop_dir};
