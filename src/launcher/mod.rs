//! Launch pipeline
//!
//! A launch runs on one thread from start to finish:
//!
//! 1. `spawn_target` starts the program without a console window
//! 2. `discover_process_tree` follows the processes it starts
//! 3. `wait_for_window` polls candidate selection until the main window shows
//! 4. `place_window` moves it to the target monitor
//! 5. `enforce_placement` puts it back whenever it drifts during the watch period
//!
//! `LaunchSession` strings these together and reports `LaunchProgress`.

pub mod enforce;
pub mod request;
pub mod session;
pub mod spawn;
pub mod wait;

pub use enforce::{EnforceReport, enforce_placement};
pub use request::{LaunchRequest, normalize_path_input, resolve_program_path, working_dir_for};
pub use session::{LaunchObserver, LaunchOutcome, LaunchProgress, LaunchSession};
pub use spawn::{OsSpawner, Spawner, spawn_target};
pub use wait::{discover_process_tree, wait_for_window};
