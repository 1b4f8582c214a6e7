//! Window placement on a target monitor
//!
//! - `PlacementMode`: maximize, fit to work area, or normal window
//! - `layout`: pure target-rectangle computation from a work area
//! - `placer`: the restore → park → maximize/fill sequence

pub mod layout;
pub mod mode;
pub mod placer;

pub use layout::{normal_rect, park_rect};
pub use mode::PlacementMode;
pub use placer::place_window;
