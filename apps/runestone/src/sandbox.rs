use glam::{Vec2, Vec4};
use rune_core::events::KeyCode;
use rune_core::render::{VertexArray, VertexBuffer};
use rune_core::{FrameContext, Layer, LayerError, Timestep};

/// Normalized device units per second.
const NUDGE_SPEED: f32 = 0.8;
const HALF_EXTENT: f32 = 0.25;
const QUAD_COLOR: [f32; 4] = [0.9, 0.55, 0.2, 1.0];

/// Demo scene: a pulsing clear color and a quad moved with the arrow keys.
pub struct SandboxLayer {
    quad: VertexArray,
    position: Vec2,
    elapsed: f32,
}

fn clear_color(elapsed: f32) -> Vec4 {
    let pulse = 0.5 + 0.5 * (elapsed * 0.7).sin();
    Vec4::new(0.06 + 0.08 * pulse, 0.07, 0.12 + 0.1 * pulse, 1.0)
}

impl SandboxLayer {
    pub fn new() -> Self {
        Self {
            quad: VertexArray::quad([0.0, 0.0], [HALF_EXTENT; 2], QUAD_COLOR),
            position: Vec2::ZERO,
            elapsed: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    fn nudge(&mut self, ts: Timestep, frame: &FrameContext<'_>) {
        let input = frame.input();
        let mut dir = Vec2::ZERO;
        if input.is_key_pressed(KeyCode::ArrowLeft) {
            dir.x -= 1.0;
        }
        if input.is_key_pressed(KeyCode::ArrowRight) {
            dir.x += 1.0;
        }
        if input.is_key_pressed(KeyCode::ArrowUp) {
            dir.y += 1.0;
        }
        if input.is_key_pressed(KeyCode::ArrowDown) {
            dir.y -= 1.0;
        }
        if dir == Vec2::ZERO {
            return;
        }

        let limit = 1.0 - HALF_EXTENT;
        self.position = (self.position + dir.normalize() * NUDGE_SPEED * ts.seconds())
            .clamp(Vec2::splat(-limit), Vec2::splat(limit));
        self.quad.set_vertex_buffer(VertexBuffer::quad(
            self.position.to_array(),
            [HALF_EXTENT; 2],
            QUAD_COLOR,
        ));
    }
}

impl Default for SandboxLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for SandboxLayer {
    fn name(&self) -> &str {
        "Sandbox"
    }

    fn on_attach(&mut self) {
        tracing::debug!("sandbox attached");
    }

    fn on_update(&mut self, ts: Timestep, frame: &mut FrameContext<'_>) -> Result<(), LayerError> {
        self.elapsed += ts.seconds();
        self.nudge(ts, frame);

        let renderer = frame.renderer();
        renderer.set_clear_color(clear_color(self.elapsed));
        renderer.clear();
        renderer.draw_indexed(&self.quad);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rune_core::events::{Event, KeyPressed};
    use rune_core::input::Input;
    use rune_core::render::{HeadlessRendererApi, RenderCommand};

    #[test]
    fn draws_quad_after_clear() {
        let mut layer = SandboxLayer::new();
        let mut api = HeadlessRendererApi::new();
        let input = Input::new();
        let mut frame = FrameContext::new(&mut api, &input, (800, 600));
        layer
            .on_update(Timestep::from_seconds(0.016), &mut frame)
            .unwrap();

        let commands = api.commands();
        assert!(matches!(commands[0], RenderCommand::SetClearColor(_)));
        assert_eq!(commands[1], RenderCommand::Clear);
        assert!(matches!(
            commands[2],
            RenderCommand::DrawIndexed { index_count: 6, .. }
        ));
    }

    #[test]
    fn arrow_key_moves_quad() {
        let mut layer = SandboxLayer::new();
        let revision = layer.quad.revision();
        let mut api = HeadlessRendererApi::new();
        let mut input = Input::new();
        input.on_event(&Event::from(KeyPressed {
            key: KeyCode::ArrowRight,
            repeat: false,
        }));

        let mut frame = FrameContext::new(&mut api, &input, (800, 600));
        layer
            .on_update(Timestep::from_seconds(0.5), &mut frame)
            .unwrap();

        assert!(layer.position().x > 0.0);
        assert_eq!(layer.position().y, 0.0);
        assert!(layer.quad.revision() > revision);
        let moved = layer.quad.vertex_buffer().map(|vb| vb.vertices()[0].position);
        assert_eq!(
            moved,
            Some([layer.position().x - HALF_EXTENT, -HALF_EXTENT, 0.0])
        );
    }

    #[test]
    fn quad_stays_on_screen() {
        let mut layer = SandboxLayer::new();
        let mut api = HeadlessRendererApi::new();
        let mut input = Input::new();
        input.on_event(&Event::from(KeyPressed {
            key: KeyCode::ArrowUp,
            repeat: false,
        }));

        let mut frame = FrameContext::new(&mut api, &input, (800, 600));
        layer
            .on_update(Timestep::from_seconds(10.0), &mut frame)
            .unwrap();
        assert_eq!(layer.position().y, 1.0 - HALF_EXTENT);
    }
}
