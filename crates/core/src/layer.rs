use crate::error::LayerError;
use crate::time::Timestep;
use rune_events::Event;
use rune_input::Input;
use rune_render::RendererApi;

/// Identity handed out when a layer is pushed; used to pop it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

/// Per-frame services available to [`Layer::on_update`].
pub struct FrameContext<'a> {
    renderer: &'a mut dyn RendererApi,
    input: &'a Input,
    window_size: (u32, u32),
    close_requested: bool,
}

impl<'a> FrameContext<'a> {
    pub fn new(renderer: &'a mut dyn RendererApi, input: &'a Input, window_size: (u32, u32)) -> Self {
        Self {
            renderer,
            input,
            window_size,
            close_requested: false,
        }
    }

    pub fn renderer(&mut self) -> &mut dyn RendererApi {
        &mut *self.renderer
    }

    pub fn input(&self) -> &Input {
        self.input
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Stop the application once the current frame completes.
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }
}

/// A unit of per-frame logic composed into the [`LayerStack`](crate::LayerStack).
///
/// Every hook defaults to a no-op; implement only what the layer needs.
pub trait Layer {
    fn name(&self) -> &str {
        "Layer"
    }

    /// Called once when pushed onto the stack.
    fn on_attach(&mut self) {}

    /// Called once when popped, or when the stack is dropped.
    fn on_detach(&mut self) {}

    /// Advance by `ts`. Skipped while the window is minimized.
    fn on_update(&mut self, _ts: Timestep, _frame: &mut FrameContext<'_>) -> Result<(), LayerError> {
        Ok(())
    }

    /// Observe an event; set `event.handled` to stop it reaching lower layers.
    fn on_event(&mut self, _event: &mut Event) {}

    /// Issue immediate-mode UI inside the frame's UI pass.
    fn on_render_ui(&mut self, _ctx: &egui::Context) {}
}
