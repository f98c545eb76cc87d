use rune_core::events::{Event, EventDispatcher, KeyCode, KeyPressed};
use rune_core::{FrameContext, Layer, LayerError, Timestep};

/// Number of frames averaged for the displayed frame time.
const HISTORY: usize = 120;

/// Frame-time panel drawn above every other layer. F1 toggles it.
pub struct DebugOverlay {
    visible: bool,
    frame_times: Vec<f32>,
    cursor: usize,
    window_size: (u32, u32),
}

impl DebugOverlay {
    pub fn new() -> Self {
        Self {
            visible: true,
            frame_times: Vec::with_capacity(HISTORY),
            cursor: 0,
            window_size: (0, 0),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn record(&mut self, millis: f32) {
        if self.frame_times.len() < HISTORY {
            self.frame_times.push(millis);
        } else {
            self.frame_times[self.cursor] = millis;
        }
        self.cursor = (self.cursor + 1) % HISTORY;
    }

    /// Mean frame time in milliseconds over the recorded history.
    pub fn average_millis(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for DebugOverlay {
    fn name(&self) -> &str {
        "DebugOverlay"
    }

    fn on_update(&mut self, ts: Timestep, frame: &mut FrameContext<'_>) -> Result<(), LayerError> {
        self.record(ts.millis());
        self.window_size = frame.window_size();
        Ok(())
    }

    fn on_event(&mut self, event: &mut Event) {
        let mut dispatcher = EventDispatcher::new(event);
        dispatcher.dispatch::<KeyPressed, _>(|e| {
            if e.key != KeyCode::F1 || e.repeat {
                return false;
            }
            self.visible = !self.visible;
            tracing::debug!(visible = self.visible, "debug overlay toggled");
            true
        });
    }

    fn on_render_ui(&mut self, ctx: &egui::Context) {
        if !self.visible {
            return;
        }
        let avg = self.average_millis();
        egui::Window::new("Debug")
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Frame: {avg:.2} ms"));
                if avg > 0.0 {
                    ui.label(format!("FPS: {:.0}", 1000.0 / avg));
                }
                ui.label(format!(
                    "Window: {} x {}",
                    self.window_size.0, self.window_size.1
                ));
                ui.separator();
                ui.small("F1: Toggle | Arrows: Move quad");
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rune_core::events::KeyReleased;

    fn press(key: KeyCode) -> Event {
        KeyPressed { key, repeat: false }.into()
    }

    #[test]
    fn f1_toggles_and_is_swallowed() {
        let mut overlay = DebugOverlay::new();
        let mut event = press(KeyCode::F1);
        overlay.on_event(&mut event);
        assert!(event.handled);
        assert!(!overlay.is_visible());

        let mut event = press(KeyCode::F1);
        overlay.on_event(&mut event);
        assert!(overlay.is_visible());
    }

    #[test]
    fn other_keys_pass_through() {
        let mut overlay = DebugOverlay::new();
        let mut event = press(KeyCode::KeyA);
        overlay.on_event(&mut event);
        assert!(!event.handled);

        let mut event = Event::from(KeyReleased { key: KeyCode::F1 });
        overlay.on_event(&mut event);
        assert!(!event.handled);
        assert!(overlay.is_visible());
    }

    #[test]
    fn average_wraps_history() {
        let mut overlay = DebugOverlay::new();
        assert_eq!(overlay.average_millis(), 0.0);
        for _ in 0..HISTORY {
            overlay.record(10.0);
        }
        for _ in 0..HISTORY {
            overlay.record(20.0);
        }
        assert_eq!(overlay.frame_times.len(), HISTORY);
        assert_eq!(overlay.average_millis(), 20.0);
    }

    #[test]
    fn renders_panel_without_panicking() {
        let mut overlay = DebugOverlay::new();
        overlay.record(16.0);
        let ctx = egui::Context::default();
        ctx.begin_pass(egui::RawInput::default());
        overlay.on_render_ui(&ctx);
        let _ = ctx.end_pass();
    }
}
