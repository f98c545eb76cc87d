//! Core: the application frame loop and the layer stack it drives.
//!
//! # Invariants
//! - Layers update and render in insertion order, overlays last.
//! - Events reach layers in reverse order and stop once handled.
//! - The application is an owned value; nothing here is process-global.

pub mod application;
pub mod error;
pub mod headless;
pub mod layer;
pub mod layer_stack;
pub mod time;
pub mod window;

pub use application::Application;
pub use error::{CoreError, LayerError};
pub use headless::HeadlessWindow;
pub use layer::{FrameContext, Layer, LayerId};
pub use layer_stack::LayerStack;
pub use time::{FrameClock, Timestep};
pub use window::{Window, WindowProps};

pub use egui;
pub use rune_events as events;
pub use rune_input as input;
pub use rune_render as render;
