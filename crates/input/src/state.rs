use glam::Vec2;
use rune_events::{Event, EventKind, KeyCode, MouseButton};
use std::collections::HashSet;

/// Snapshot of which keys and buttons are held and where the cursor is.
///
/// Layers poll this during `on_update` instead of tracking raw events.
#[derive(Debug, Default, Clone)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    buttons_held: HashSet<MouseButton>,
    mouse_position: Vec2,
    last_scroll: Vec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the input state.
    pub fn on_event(&mut self, event: &Event) {
        match event.kind {
            EventKind::KeyPressed(e) => {
                self.keys_held.insert(e.key);
            }
            EventKind::KeyReleased(e) => {
                self.keys_held.remove(&e.key);
            }
            EventKind::MouseButtonPressed(e) => {
                self.buttons_held.insert(e.button);
            }
            EventKind::MouseButtonReleased(e) => {
                self.buttons_held.remove(&e.button);
            }
            EventKind::MouseMoved(e) => {
                self.mouse_position = Vec2::new(e.x, e.y);
            }
            EventKind::MouseScrolled(e) => {
                self.last_scroll = Vec2::new(e.x_offset, e.y_offset);
            }
            EventKind::WindowLostFocus(_) => {
                if !self.keys_held.is_empty() || !self.buttons_held.is_empty() {
                    tracing::debug!("focus lost, releasing held input");
                }
                self.release_all();
            }
            _ => {}
        }
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_held.contains(&button)
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    pub fn mouse_x(&self) -> f32 {
        self.mouse_position.x
    }

    pub fn mouse_y(&self) -> f32 {
        self.mouse_position.y
    }

    /// Offset of the most recent scroll event.
    pub fn last_scroll(&self) -> Vec2 {
        self.last_scroll
    }

    pub fn release_all(&mut self) {
        self.keys_held.clear();
        self.buttons_held.clear();
    }
}
