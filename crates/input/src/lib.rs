//! Input: polled keyboard and mouse state.
//!
//! # Invariants
//! - State changes only through events fed by the application.
//! - Losing window focus releases every held key and button.

pub mod state;

pub use rune_events::{KeyCode, MouseButton};
pub use state::Input;
