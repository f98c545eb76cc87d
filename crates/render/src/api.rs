use crate::buffer::VertexArray;
use glam::Vec4;

/// Which implementation sits behind a [`RendererApi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Headless,
    Wgpu,
}

/// Color blending applied to subsequent draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Source replaces destination.
    #[default]
    Opaque,
    /// `src * src_alpha + dst * (1 - src_alpha)`.
    Alpha,
}

/// Rendering rectangle in framebuffer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersect with a `target_width` x `target_height` framebuffer.
    /// Returns `None` when nothing of the viewport remains visible.
    pub fn clamped(&self, target_width: u32, target_height: u32) -> Option<Viewport> {
        if self.x >= target_width || self.y >= target_height {
            return None;
        }
        let clamped = Viewport {
            x: self.x,
            y: self.y,
            width: self.width.min(target_width - self.x),
            height: self.height.min(target_height - self.y),
        };
        (!clamped.is_empty()).then_some(clamped)
    }
}

/// Graphics backend interface. One implementation per GPU API.
///
/// Calls are fire-and-forget: there is no error channel, matching a thin
/// pass-through over the underlying graphics library.
pub trait RendererApi {
    /// Configure default state (alpha blending).
    fn init(&mut self);

    /// Color used by later [`clear`](Self::clear) calls.
    fn set_clear_color(&mut self, color: Vec4);

    /// Clear color and depth.
    fn clear(&mut self);

    /// Issue an indexed triangle draw. Skipped when no index buffer is bound.
    fn draw_indexed(&mut self, vertex_array: &VertexArray);

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32);

    fn backend(&self) -> Backend;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_inside_target_is_unchanged() {
        let vp = Viewport::new(0, 0, 800, 600);
        assert_eq!(vp.clamped(1280, 720), Some(vp));
    }

    #[test]
    fn viewport_is_clipped_to_target() {
        let vp = Viewport::new(100, 50, 800, 600);
        assert_eq!(vp.clamped(640, 480), Some(Viewport::new(100, 50, 540, 430)));
    }

    #[test]
    fn viewport_outside_or_empty() {
        assert_eq!(Viewport::new(700, 0, 10, 10).clamped(640, 480), None);
        assert_eq!(Viewport::new(0, 0, 0, 10).clamped(640, 480), None);
        assert!(Viewport::new(0, 0, 10, 0).is_empty());
    }

    #[test]
    fn default_blend_is_opaque() {
        assert_eq!(BlendMode::default(), BlendMode::Opaque);
    }
}
