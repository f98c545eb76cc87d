use crate::error::{CoreError, LayerError};
use crate::layer::{FrameContext, Layer, LayerId};
use crate::layer_stack::LayerStack;
use crate::time::FrameClock;
use crate::window::Window;
use rune_events::{Event, EventDispatcher, WindowClose, WindowResize};
use rune_input::Input;
use rune_render::Renderer;

/// Owns the window, the layer stack and the renderer, and runs the frame loop.
///
/// Each frame: update layers (unless minimized), run the UI pass, update the
/// window, then dispatch the window's queued events. A close event stops the
/// loop before the next frame starts.
pub struct Application<W: Window> {
    window: W,
    layers: LayerStack,
    renderer: Renderer<W::Api>,
    input: Input,
    clock: FrameClock,
    running: bool,
    minimized: bool,
    frame_count: u64,
}

impl<W: Window> Application<W> {
    pub fn new(mut window: W) -> Self {
        let mut renderer = Renderer::new(window.create_renderer_api());
        renderer.init();
        tracing::info!(
            title = window.title(),
            width = window.width(),
            height = window.height(),
            "application created"
        );
        Self {
            window,
            layers: LayerStack::new(),
            renderer,
            input: Input::new(),
            clock: FrameClock::new(),
            running: true,
            minimized: false,
            frame_count: 0,
        }
    }

    pub fn push_layer(&mut self, layer: impl Layer + 'static) -> LayerId {
        self.layers.push_layer(Box::new(layer))
    }

    pub fn push_overlay(&mut self, layer: impl Layer + 'static) -> LayerId {
        self.layers.push_overlay(Box::new(layer))
    }

    pub fn pop_layer(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        self.layers.pop_layer(id)
    }

    pub fn pop_overlay(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        self.layers.pop_overlay(id)
    }

    /// Run frames until the application stops.
    pub fn run(&mut self) -> Result<(), CoreError> {
        tracing::info!("application running");
        while self.running {
            self.run_frame()?;
        }
        tracing::info!(frames = self.frame_count, "application stopped");
        Ok(())
    }

    /// Run exactly one iteration of the frame loop.
    pub fn run_frame(&mut self) -> Result<(), CoreError> {
        let ts = self.clock.tick();
        self.frame_count += 1;

        if !self.minimized {
            let size = (self.window.width(), self.window.height());
            let mut frame = FrameContext::new(self.renderer.api_mut(), &self.input, size);
            for layer in self.layers.iter_mut() {
                layer
                    .on_update(ts, &mut frame)
                    .map_err(|source: LayerError| CoreError::Layer {
                        layer: layer.name().to_owned(),
                        source,
                    })?;
            }
            if frame.close_requested() {
                tracing::info!("close requested by layer");
                self.running = false;
            }
        }

        let ui = self.window.begin_ui();
        for layer in self.layers.iter_mut() {
            layer.on_render_ui(&ui);
        }
        self.window.end_ui();

        self.window
            .on_update(self.renderer.api_mut())
            .map_err(|e| CoreError::Window(Box::new(e)))?;

        for mut event in self.window.drain_events() {
            self.on_event(&mut event);
        }
        Ok(())
    }

    /// Route one event: built-in handlers first, then layers top-to-bottom.
    pub fn on_event(&mut self, event: &mut Event) {
        tracing::trace!(%event, "event");
        self.input.on_event(event);

        let mut dispatcher = EventDispatcher::new(event);
        dispatcher.dispatch::<WindowClose, _>(|_| self.on_window_close());
        dispatcher.dispatch::<WindowResize, _>(|e| self.on_window_resize(e.width, e.height));

        self.layers.dispatch_event(event);
    }

    /// Stop the loop after the current frame.
    pub fn close(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn renderer(&self) -> &Renderer<W::Api> {
        &self.renderer
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    fn on_window_close(&mut self) -> bool {
        tracing::info!("window close requested");
        self.running = false;
        true
    }

    // Never handled: layers observe resizes too.
    fn on_window_resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            if !self.minimized {
                tracing::debug!("window minimized");
            }
            self.minimized = true;
            return false;
        }
        if self.minimized {
            tracing::debug!(width, height, "window restored");
        }
        self.minimized = false;
        self.renderer.on_window_resize(width, height);
        false
    }
}
