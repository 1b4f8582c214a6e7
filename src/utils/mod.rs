//! Utility modules
//!
//! Logging setup and the process-wide Windows settings applied at startup.

pub mod logging;
pub mod process_setup;

pub use logging::init_logging;
pub use process_setup::{DpiAwareness, enable_dpi_awareness, set_app_user_model_id};
