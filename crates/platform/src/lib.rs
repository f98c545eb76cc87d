//! Platform: the desktop [`rune_core::Window`] built on winit, wgpu and egui.
//!
//! # Invariants
//! - The OS event queue is drained on the calling thread, once per frame.
//! - Input events consumed by the UI arrive pre-marked as handled.

mod error;
mod gpu;
mod translate;
mod ui;
mod window;

pub use error::PlatformError;
pub use translate::{mark_ui_consumed, translate_window_event};
pub use window::DesktopWindow;
