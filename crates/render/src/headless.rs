use crate::api::{Backend, BlendMode, RendererApi, Viewport};
use crate::buffer::{VertexArray, VertexArrayId};
use glam::Vec4;

/// One recorded renderer call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderCommand {
    Init,
    SetClearColor(Vec4),
    Clear,
    SetViewport(Viewport),
    DrawIndexed {
        vertex_array: VertexArrayId,
        index_count: u32,
    },
}

/// Backend that records calls instead of drawing.
///
/// Stands in for the GPU backend in tests and headless runs.
#[derive(Debug, Default)]
pub struct HeadlessRendererApi {
    commands: Vec<RenderCommand>,
    clear_color: Vec4,
    blend: BlendMode,
    viewport: Option<Viewport>,
}

impl HeadlessRendererApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear_color(&self) -> Vec4 {
        self.clear_color
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawIndexed { .. }))
            .count()
    }
}

impl RendererApi for HeadlessRendererApi {
    fn init(&mut self) {
        self.blend = BlendMode::Alpha;
        self.commands.push(RenderCommand::Init);
    }

    fn set_clear_color(&mut self, color: Vec4) {
        self.clear_color = color;
        self.commands.push(RenderCommand::SetClearColor(color));
    }

    fn clear(&mut self) {
        self.commands.push(RenderCommand::Clear);
    }

    fn draw_indexed(&mut self, vertex_array: &VertexArray) {
        let Some(index_count) = vertex_array.drawable_index_count() else {
            tracing::trace!(id = vertex_array.id().0, "draw skipped: no index buffer");
            return;
        };
        self.commands.push(RenderCommand::DrawIndexed {
            vertex_array: vertex_array.id(),
            index_count,
        });
    }

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let viewport = Viewport::new(x, y, width, height);
        self.viewport = Some(viewport);
        self.commands.push(RenderCommand::SetViewport(viewport));
    }

    fn backend(&self) -> Backend {
        Backend::Headless
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{IndexBuffer, VertexBuffer};

    #[test]
    fn init_enables_alpha_blending() {
        let mut api = HeadlessRendererApi::new();
        assert_eq!(api.blend_mode(), BlendMode::Opaque);
        api.init();
        assert_eq!(api.blend_mode(), BlendMode::Alpha);
        assert_eq!(api.commands(), &[RenderCommand::Init]);
    }

    #[test]
    fn records_calls_in_order() {
        let mut api = HeadlessRendererApi::new();
        let quad = VertexArray::quad([0.0, 0.0], [0.25, 0.25], [1.0; 4]);
        api.set_clear_color(Vec4::new(0.1, 0.1, 0.1, 1.0));
        api.clear();
        api.draw_indexed(&quad);
        api.set_viewport(0, 0, 320, 240);

        assert_eq!(
            api.commands(),
            &[
                RenderCommand::SetClearColor(Vec4::new(0.1, 0.1, 0.1, 1.0)),
                RenderCommand::Clear,
                RenderCommand::DrawIndexed {
                    vertex_array: quad.id(),
                    index_count: 6
                },
                RenderCommand::SetViewport(Viewport::new(0, 0, 320, 240)),
            ]
        );
        assert_eq!(api.viewport(), Some(Viewport::new(0, 0, 320, 240)));
    }

    #[test]
    fn draw_without_index_buffer_is_skipped() {
        let mut api = HeadlessRendererApi::new();
        let mut va = VertexArray::new();
        va.set_vertex_buffer(VertexBuffer::new(Vec::new()));
        api.draw_indexed(&va);
        va.set_index_buffer(IndexBuffer::new(Vec::new()));
        api.draw_indexed(&va);
        assert_eq!(api.draw_count(), 0);
        assert!(api.commands().is_empty());
    }

    #[test]
    fn take_commands_drains() {
        let mut api = HeadlessRendererApi::new();
        api.clear();
        assert_eq!(api.take_commands(), vec![RenderCommand::Clear]);
        assert!(api.commands().is_empty());
    }
}
