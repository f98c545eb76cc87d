use rune_events::{
    Event, EventCategory, KeyPressed, KeyReleased, KeyTyped, MouseButtonPressed, MouseButtonReleased,
    MouseMoved, MouseScrolled, WindowClose, WindowFocus, WindowLostFocus, WindowMoved,
    WindowResize,
};
use winit::event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

/// Convert one winit window event into engine events.
///
/// A key press carrying text also yields one `KeyTyped` per printable
/// character. Events the engine has no kind for yield nothing.
pub fn translate_window_event(event: &WindowEvent) -> Vec<Event> {
    match event {
        WindowEvent::CloseRequested => vec![WindowClose.into()],
        WindowEvent::Resized(size) => vec![
            WindowResize {
                width: size.width,
                height: size.height,
            }
            .into(),
        ],
        WindowEvent::Focused(true) => vec![WindowFocus.into()],
        WindowEvent::Focused(false) => vec![WindowLostFocus.into()],
        WindowEvent::Moved(position) => vec![
            WindowMoved {
                x: position.x,
                y: position.y,
            }
            .into(),
        ],
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(key),
                    state,
                    repeat,
                    text,
                    ..
                },
            ..
        } => match state {
            ElementState::Pressed => {
                let mut events = vec![Event::from(KeyPressed {
                    key: *key,
                    repeat: *repeat,
                })];
                if let Some(text) = text {
                    events.extend(
                        text.chars()
                            .filter(|c| !c.is_control())
                            .map(|character| Event::from(KeyTyped { character })),
                    );
                }
                events
            }
            ElementState::Released => vec![KeyReleased { key: *key }.into()],
        },
        WindowEvent::MouseInput { state, button, .. } => match state {
            ElementState::Pressed => vec![MouseButtonPressed { button: *button }.into()],
            ElementState::Released => vec![MouseButtonReleased { button: *button }.into()],
        },
        WindowEvent::CursorMoved { position, .. } => vec![
            MouseMoved {
                x: position.x as f32,
                y: position.y as f32,
            }
            .into(),
        ],
        WindowEvent::MouseWheel { delta, .. } => {
            let (x_offset, y_offset) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(p) => (p.x as f32, p.y as f32),
            };
            vec![MouseScrolled { x_offset, y_offset }.into()]
        }
        _ => Vec::new(),
    }
}

/// Mark the input events of one window event as handled after the UI
/// consumed it. Application events (close, resize, focus) stay unhandled.
pub fn mark_ui_consumed(events: &mut [Event]) {
    for event in events {
        if event.is_in_category(EventCategory::Input) {
            event.handled = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rune_events::EventType;
    use winit::dpi::{PhysicalPosition, PhysicalSize};

    fn types(events: &[Event]) -> Vec<EventType> {
        events.iter().map(Event::event_type).collect()
    }

    #[test]
    fn close_and_resize() {
        assert_eq!(
            types(&translate_window_event(&WindowEvent::CloseRequested)),
            vec![EventType::WindowClose]
        );

        let events = translate_window_event(&WindowEvent::Resized(PhysicalSize::new(800, 600)));
        assert_eq!(
            events[0].payload::<WindowResize>(),
            Some(&WindowResize {
                width: 800,
                height: 600
            })
        );
        assert!(!events[0].handled);
    }

    #[test]
    fn focus_and_move() {
        assert_eq!(
            types(&translate_window_event(&WindowEvent::Focused(true))),
            vec![EventType::WindowFocus]
        );
        assert_eq!(
            types(&translate_window_event(&WindowEvent::Focused(false))),
            vec![EventType::WindowLostFocus]
        );
        let moved = translate_window_event(&WindowEvent::Moved(PhysicalPosition::new(-5, 12)));
        assert_eq!(
            moved[0].payload::<WindowMoved>(),
            Some(&WindowMoved { x: -5, y: 12 })
        );
    }

    #[test]
    fn unmapped_events_are_dropped() {
        assert!(translate_window_event(&WindowEvent::RedrawRequested).is_empty());
        assert!(translate_window_event(&WindowEvent::Destroyed).is_empty());
    }

    #[test]
    fn consumed_input_is_marked_handled() {
        let mut events = vec![
            Event::from(MouseScrolled {
                x_offset: 0.0,
                y_offset: 1.0,
            }),
            Event::from(KeyTyped { character: 'q' }),
        ];
        mark_ui_consumed(&mut events);
        assert!(events.iter().all(|e| e.handled));
    }

    #[test]
    fn consumed_application_events_stay_unhandled() {
        let mut events = translate_window_event(&WindowEvent::Resized(PhysicalSize::new(10, 10)));
        events.extend(translate_window_event(&WindowEvent::CloseRequested));
        mark_ui_consumed(&mut events);
        assert!(events.iter().all(|e| !e.handled));
    }
}
