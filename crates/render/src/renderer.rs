use crate::api::{RendererApi, Viewport};

/// Renderer front-end owning one backend.
///
/// Holds the state the application cares about (the current viewport) and
/// hands the backend to layers for the actual draw calls.
#[derive(Debug)]
pub struct Renderer<A> {
    api: A,
    viewport: Option<Viewport>,
}

impl<A: RendererApi> Renderer<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            viewport: None,
        }
    }

    pub fn init(&mut self) {
        tracing::debug!(backend = ?self.api.backend(), "renderer init");
        self.api.init();
    }

    /// Resize the viewport to cover the whole window.
    pub fn on_window_resize(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(0, 0, width, height);
        self.api.set_viewport(viewport.x, viewport.y, viewport.width, viewport.height);
        self.viewport = Some(viewport);
    }

    /// Last viewport set through [`on_window_resize`](Self::on_window_resize).
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessRendererApi, RenderCommand};

    #[test]
    fn resize_sets_full_window_viewport() {
        let mut renderer = Renderer::new(HeadlessRendererApi::new());
        renderer.init();
        renderer.on_window_resize(800, 600);

        assert_eq!(renderer.viewport(), Some(Viewport::new(0, 0, 800, 600)));
        assert_eq!(
            renderer.api().commands(),
            &[
                RenderCommand::Init,
                RenderCommand::SetViewport(Viewport::new(0, 0, 800, 600)),
            ]
        );
    }
}
