use crate::event::{Event, EventKind, EventPayload, EventType};

/// Routes one event instance to handlers registered for a specific kind.
///
/// A handler runs only when the event's tag matches; its return value
/// becomes the event's `handled` flag. Mismatched dispatches leave the event
/// untouched.
pub struct EventDispatcher<'a> {
    event: &'a mut Event,
}

impl<'a> EventDispatcher<'a> {
    pub fn new(event: &'a mut Event) -> Self {
        Self { event }
    }

    /// Invoke `handler` with the typed payload if the event is of kind `T`.
    /// Returns whether the handler ran.
    pub fn dispatch<T, F>(&mut self, handler: F) -> bool
    where
        T: EventPayload,
        F: FnOnce(&T) -> bool,
    {
        if self.event.event_type() != T::TYPE {
            return false;
        }
        let Some(payload) = T::from_kind(&self.event.kind) else {
            return false;
        };
        self.event.handled = handler(payload);
        tracing::trace!(event = %self.event, handled = self.event.handled, "dispatched");
        true
    }

    /// Untyped form of [`dispatch`](Self::dispatch), matching on a runtime tag.
    pub fn dispatch_type<F>(&mut self, event_type: EventType, handler: F) -> bool
    where
        F: FnOnce(&EventKind) -> bool,
    {
        if self.event.event_type() != event_type {
            return false;
        }
        self.event.handled = handler(&self.event.kind);
        true
    }

    pub fn event(&self) -> &Event {
        self.event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyPressed, WindowClose, WindowResize};
    use winit::keyboard::KeyCode;

    #[test]
    fn matching_handler_sets_handled() {
        let mut event = Event::from(WindowClose);
        let mut dispatcher = EventDispatcher::new(&mut event);
        let ran = dispatcher.dispatch::<WindowClose, _>(|_| true);
        assert!(ran);
        assert!(event.handled);
    }

    #[test]
    fn handler_result_overwrites_flag() {
        let mut event = Event::from(WindowResize {
            width: 0,
            height: 10,
        });
        event.handled = true;
        EventDispatcher::new(&mut event).dispatch::<WindowResize, _>(|_| false);
        assert!(!event.handled);
    }

    #[test]
    fn mismatched_kind_never_invokes_handler() {
        for initial in [false, true] {
            let mut event = Event::from(KeyPressed {
                key: KeyCode::Space,
                repeat: false,
            });
            event.handled = initial;
            let mut called = false;
            let ran = EventDispatcher::new(&mut event).dispatch::<WindowClose, _>(|_| {
                called = true;
                true
            });
            assert!(!ran);
            assert!(!called);
            assert_eq!(event.handled, initial);
        }
    }

    #[test]
    fn handler_receives_payload() {
        let mut event = Event::from(WindowResize {
            width: 800,
            height: 600,
        });
        let mut seen = None;
        EventDispatcher::new(&mut event).dispatch::<WindowResize, _>(|e| {
            seen = Some((e.width, e.height));
            false
        });
        assert_eq!(seen, Some((800, 600)));
    }

    #[test]
    fn dispatch_by_runtime_tag() {
        let mut event = Event::from(WindowClose);
        let mut dispatcher = EventDispatcher::new(&mut event);
        assert!(!dispatcher.dispatch_type(EventType::WindowResize, |_| true));
        assert!(!dispatcher.event().handled);
        assert!(dispatcher.dispatch_type(EventType::WindowClose, |kind| {
            matches!(kind, EventKind::WindowClose(_))
        }));
        assert!(event.handled);
    }
}
