use glam::Vec4;
use rune_render::{BlendMode, VertexArrayId, Viewport};

/// A renderer call recorded during the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameCommand {
    Clear(Vec4),
    Draw(DrawCall),
}

/// GPU buffers of one vertex array as it was at one revision.
pub type MeshKey = (VertexArrayId, u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub vertex_array: VertexArrayId,
    /// Revision of the vertex array when the draw was recorded.
    pub revision: u64,
    pub index_count: u32,
    pub blend: BlendMode,
    pub viewport: Option<Viewport>,
}

impl DrawCall {
    pub fn mesh_key(&self) -> MeshKey {
        (self.vertex_array, self.revision)
    }
}

/// One render pass: an optional clear followed by draws.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PassPlan {
    pub clear: Option<Vec4>,
    pub draws: Vec<DrawCall>,
}

/// Split recorded commands into render passes.
///
/// A clear opens a new pass with a clear load op. Draws land in the current
/// pass; if none is open yet, a loading pass is opened for them.
pub fn plan_passes(commands: &[FrameCommand]) -> Vec<PassPlan> {
    let mut passes: Vec<PassPlan> = Vec::new();
    for command in commands {
        match *command {
            FrameCommand::Clear(color) => passes.push(PassPlan {
                clear: Some(color),
                draws: Vec::new(),
            }),
            FrameCommand::Draw(draw) => match passes.last_mut() {
                Some(pass) => pass.draws.push(draw),
                None => passes.push(PassPlan {
                    clear: None,
                    draws: vec![draw],
                }),
            },
        }
    }
    passes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(id: u64) -> FrameCommand {
        draw_revision(id, 0)
    }

    fn draw_revision(id: u64, revision: u64) -> FrameCommand {
        FrameCommand::Draw(DrawCall {
            vertex_array: VertexArrayId(id),
            revision,
            index_count: 6,
            blend: BlendMode::Alpha,
            viewport: None,
        })
    }

    #[test]
    fn no_commands_no_passes() {
        assert!(plan_passes(&[]).is_empty());
    }

    #[test]
    fn draws_follow_their_clear() {
        let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let passes = plan_passes(&[FrameCommand::Clear(red), draw(1), draw(2)]);
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].clear, Some(red));
        assert_eq!(passes[0].draws.len(), 2);
    }

    #[test]
    fn draws_before_clear_get_a_load_pass() {
        let passes = plan_passes(&[draw(1), FrameCommand::Clear(Vec4::ONE), draw(2)]);
        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0].clear, None);
        assert_eq!(passes[0].draws[0].vertex_array, VertexArrayId(1));
        assert_eq!(passes[1].clear, Some(Vec4::ONE));
        assert_eq!(passes[1].draws[0].vertex_array, VertexArrayId(2));
    }

    #[test]
    fn consecutive_clears_each_open_a_pass() {
        let passes = plan_passes(&[
            FrameCommand::Clear(Vec4::ZERO),
            FrameCommand::Clear(Vec4::ONE),
        ]);
        assert_eq!(passes.len(), 2);
        assert!(passes.iter().all(|p| p.draws.is_empty()));
    }

    #[test]
    fn redraw_after_edit_keeps_each_revision() {
        let passes = plan_passes(&[
            FrameCommand::Clear(Vec4::ZERO),
            draw_revision(7, 2),
            draw_revision(7, 3),
        ]);
        let keys: Vec<MeshKey> = passes[0].draws.iter().map(DrawCall::mesh_key).collect();
        assert_eq!(keys, vec![(VertexArrayId(7), 2), (VertexArrayId(7), 3)]);
    }
}
