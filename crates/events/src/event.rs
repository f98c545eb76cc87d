use std::fmt;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Discriminant of an [`EventKind`], used for dispatch by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    WindowClose,
    WindowResize,
    WindowFocus,
    WindowLostFocus,
    WindowMoved,
    KeyPressed,
    KeyReleased,
    KeyTyped,
    MouseButtonPressed,
    MouseButtonReleased,
    MouseMoved,
    MouseScrolled,
}

/// Coarse grouping of event types, useful for layers that only care about
/// e.g. mouse input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Application,
    Input,
    Keyboard,
    Mouse,
    MouseButton,
}

impl EventType {
    /// Categories this event type belongs to.
    pub fn categories(self) -> &'static [EventCategory] {
        use EventCategory as C;
        match self {
            EventType::WindowClose
            | EventType::WindowResize
            | EventType::WindowFocus
            | EventType::WindowLostFocus
            | EventType::WindowMoved => &[C::Application],
            EventType::KeyPressed | EventType::KeyReleased | EventType::KeyTyped => {
                &[C::Input, C::Keyboard]
            }
            EventType::MouseButtonPressed | EventType::MouseButtonReleased => {
                &[C::Input, C::Mouse, C::MouseButton]
            }
            EventType::MouseMoved | EventType::MouseScrolled => &[C::Input, C::Mouse],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowClose;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowResize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowFocus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowLostFocus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMoved {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPressed {
    pub key: KeyCode,
    /// True when generated by key auto-repeat.
    pub repeat: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyReleased {
    pub key: KeyCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTyped {
    pub character: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonPressed {
    pub button: MouseButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonReleased {
    pub button: MouseButton,
}

/// Cursor position in physical pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoved {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseScrolled {
    pub x_offset: f32,
    pub y_offset: f32,
}

/// Payload of an event, one variant per [`EventType`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    WindowClose(WindowClose),
    WindowResize(WindowResize),
    WindowFocus(WindowFocus),
    WindowLostFocus(WindowLostFocus),
    WindowMoved(WindowMoved),
    KeyPressed(KeyPressed),
    KeyReleased(KeyReleased),
    KeyTyped(KeyTyped),
    MouseButtonPressed(MouseButtonPressed),
    MouseButtonReleased(MouseButtonReleased),
    MouseMoved(MouseMoved),
    MouseScrolled(MouseScrolled),
}

/// A payload struct that can be matched out of an [`EventKind`] by its tag.
pub trait EventPayload: Sized {
    const TYPE: EventType;

    fn from_kind(kind: &EventKind) -> Option<&Self>;
}

macro_rules! event_payloads {
    ($($name:ident),* $(,)?) => {
        impl EventKind {
            pub fn event_type(&self) -> EventType {
                match self {
                    $(EventKind::$name(_) => EventType::$name,)*
                }
            }
        }

        $(
            impl EventPayload for $name {
                const TYPE: EventType = EventType::$name;

                fn from_kind(kind: &EventKind) -> Option<&Self> {
                    match kind {
                        EventKind::$name(payload) => Some(payload),
                        _ => None,
                    }
                }
            }

            impl From<$name> for EventKind {
                fn from(payload: $name) -> Self {
                    EventKind::$name(payload)
                }
            }

            impl From<$name> for Event {
                fn from(payload: $name) -> Self {
                    Event::new(EventKind::$name(payload))
                }
            }
        )*
    };
}

event_payloads!(
    WindowClose,
    WindowResize,
    WindowFocus,
    WindowLostFocus,
    WindowMoved,
    KeyPressed,
    KeyReleased,
    KeyTyped,
    MouseButtonPressed,
    MouseButtonReleased,
    MouseMoved,
    MouseScrolled,
);

/// A window or input event travelling through the application.
///
/// Once `handled` is set, the layer stack stops delivering this instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub handled: bool,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            handled: false,
        }
    }

    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }

    pub fn is_in_category(&self, category: EventCategory) -> bool {
        self.event_type().categories().contains(&category)
    }

    /// Borrow the payload if this event is of kind `T`.
    pub fn payload<T: EventPayload>(&self) -> Option<&T> {
        T::from_kind(&self.kind)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EventKind::WindowClose(_) => write!(f, "WindowClose"),
            EventKind::WindowResize(e) => write!(f, "WindowResize: {}, {}", e.width, e.height),
            EventKind::WindowFocus(_) => write!(f, "WindowFocus"),
            EventKind::WindowLostFocus(_) => write!(f, "WindowLostFocus"),
            EventKind::WindowMoved(e) => write!(f, "WindowMoved: {}, {}", e.x, e.y),
            EventKind::KeyPressed(e) => write!(f, "KeyPressed: {:?} (repeat={})", e.key, e.repeat),
            EventKind::KeyReleased(e) => write!(f, "KeyReleased: {:?}", e.key),
            EventKind::KeyTyped(e) => write!(f, "KeyTyped: {:?}", e.character),
            EventKind::MouseButtonPressed(e) => write!(f, "MouseButtonPressed: {:?}", e.button),
            EventKind::MouseButtonReleased(e) => write!(f, "MouseButtonReleased: {:?}", e.button),
            EventKind::MouseMoved(e) => write!(f, "MouseMoved: {:.1}, {:.1}", e.x, e.y),
            EventKind::MouseScrolled(e) => {
                write!(f, "MouseScrolled: {:.1}, {:.1}", e.x_offset, e.y_offset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_is_unhandled() {
        let event = Event::from(WindowClose);
        assert!(!event.handled);
        assert_eq!(event.event_type(), EventType::WindowClose);
    }

    #[test]
    fn payload_matches_tag_only() {
        let event = Event::from(WindowResize {
            width: 800,
            height: 600,
        });
        assert_eq!(
            event.payload::<WindowResize>(),
            Some(&WindowResize {
                width: 800,
                height: 600
            })
        );
        assert!(event.payload::<WindowClose>().is_none());
    }

    #[test]
    fn categories() {
        let key = Event::from(KeyPressed {
            key: KeyCode::KeyA,
            repeat: false,
        });
        assert!(key.is_in_category(EventCategory::Input));
        assert!(key.is_in_category(EventCategory::Keyboard));
        assert!(!key.is_in_category(EventCategory::Mouse));

        let click = Event::from(MouseButtonPressed {
            button: MouseButton::Left,
        });
        assert!(click.is_in_category(EventCategory::MouseButton));
        assert!(click.is_in_category(EventCategory::Mouse));

        let close = Event::from(WindowClose);
        assert!(close.is_in_category(EventCategory::Application));
        assert!(!close.is_in_category(EventCategory::Input));
    }

    #[test]
    fn display_includes_payload() {
        let event = Event::from(WindowResize {
            width: 1280,
            height: 720,
        });
        assert_eq!(event.to_string(), "WindowResize: 1280, 720");
    }
}
