//! Native message boxes and the program picker
//!
//! rfd dialogs on Windows; stderr fallbacks elsewhere so the GUI can still be
//! exercised during development.

use std::path::PathBuf;

/// Window title used for every dialog
const DIALOG_TITLE: &str = "Launch on Please";

/// Show an information message box
#[cfg(windows)]
pub fn show_info(message: &str) {
    rfd::MessageDialog::new()
        .set_title(DIALOG_TITLE)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .set_level(rfd::MessageLevel::Info)
        .show();
}

/// Show an error message box
#[cfg(windows)]
pub fn show_error(message: &str) {
    rfd::MessageDialog::new()
        .set_title(DIALOG_TITLE)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .set_level(rfd::MessageLevel::Error)
        .show();
}

/// Ask the user for a program to launch
#[cfg(windows)]
pub fn pick_program(start_dir: Option<PathBuf>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Choose a program")
        .add_filter("Programs (*.exe)", &["exe"])
        .add_filter("All Files (*.*)", &["*"]);
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file()
}

#[cfg(not(windows))]
pub fn show_info(message: &str) {
    println!("{DIALOG_TITLE}: {message}");
}

#[cfg(not(windows))]
pub fn show_error(message: &str) {
    eprintln!("{DIALOG_TITLE} - Error: {message}");
}

#[cfg(not(windows))]
pub fn pick_program(_start_dir: Option<PathBuf>) -> Option<PathBuf> {
    eprintln!("{DIALOG_TITLE}: file picker is only available on Windows, type the path instead");
    None
}
