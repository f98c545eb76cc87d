//! Events: tagged window/input events and the dispatcher that routes them.
//!
//! # Invariants
//! - Dispatch matches on the event's tag, never on handler type.
//! - A handled event is not re-delivered by consumers that honor the flag.

pub mod dispatcher;
pub mod event;

pub use dispatcher::EventDispatcher;
pub use event::{
    Event, EventCategory, EventKind, EventPayload, EventType, KeyPressed, KeyReleased, KeyTyped,
    MouseButtonPressed, MouseButtonReleased, MouseMoved, MouseScrolled, WindowClose,
    WindowFocus, WindowLostFocus, WindowMoved, WindowResize,
};
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;
