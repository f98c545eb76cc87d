//! Rendering API: backend-agnostic draw interface.
//!
//! # Invariants
//! - Backends never return errors; failures are logged and the call skipped.
//! - A draw without a bound index buffer is a no-op.
//!
//! The [`HeadlessRendererApi`] records calls instead of drawing, so the
//! frame loop can run and be tested without a GPU.

mod api;
mod buffer;
mod headless;
mod renderer;

pub use api::{Backend, BlendMode, RendererApi, Viewport};
pub use buffer::{IndexBuffer, Vertex, VertexArray, VertexArrayId, VertexBuffer};
pub use headless::{HeadlessRendererApi, RenderCommand};
pub use renderer::Renderer;
