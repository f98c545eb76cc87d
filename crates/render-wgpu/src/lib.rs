//! wgpu backend for [`rune_render::RendererApi`].
//!
//! Calls made during a frame are recorded and uploaded lazily; the window
//! flushes them into render passes right before presenting.
//!
//! # Invariants
//! - Every `clear()` starts a new pass; draws never cross a clear.
//! - Viewports are clipped to the target; empty ones drop the draw.

mod backend;
mod pass;
mod shaders;

pub use backend::WgpuRendererApi;
pub use pass::{DrawCall, FrameCommand, MeshKey, PassPlan, plan_passes};
