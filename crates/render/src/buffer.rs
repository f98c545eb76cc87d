use bytemuck::{Pod, Zeroable};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_VERTEX_ARRAY_ID: AtomicU64 = AtomicU64::new(1);

/// Interleaved vertex: clip-space position and RGBA color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBuffer {
    vertices: Vec<Vertex>,
}

impl VertexBuffer {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// Four corners of an axis-aligned quad, counter-clockwise from bottom-left.
    pub fn quad(center: [f32; 2], half_extent: [f32; 2], color: [f32; 4]) -> Self {
        let [cx, cy] = center;
        let [hx, hy] = half_extent;
        Self::new(vec![
            Vertex::new([cx - hx, cy - hy, 0.0], color),
            Vertex::new([cx + hx, cy - hy, 0.0], color),
            Vertex::new([cx + hx, cy + hy, 0.0], color),
            Vertex::new([cx - hx, cy + hy, 0.0], color),
        ])
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexBuffer {
    indices: Vec<u32>,
}

impl IndexBuffer {
    pub fn new(indices: Vec<u32>) -> Self {
        Self { indices }
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of indices, i.e. the element count of an indexed draw.
    pub fn count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Process-unique identity of a [`VertexArray`]; backends key GPU resources on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexArrayId(pub u64);

/// A vertex buffer plus an optional index buffer, drawn as one unit.
///
/// Every mutation bumps the revision so backends know to re-upload.
#[derive(Debug)]
pub struct VertexArray {
    id: VertexArrayId,
    revision: u64,
    vertex_buffer: Option<VertexBuffer>,
    index_buffer: Option<IndexBuffer>,
}

impl VertexArray {
    pub fn new() -> Self {
        Self {
            id: VertexArrayId(NEXT_VERTEX_ARRAY_ID.fetch_add(1, Ordering::Relaxed)),
            revision: 0,
            vertex_buffer: None,
            index_buffer: None,
        }
    }

    pub fn id(&self) -> VertexArrayId {
        self.id
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_vertex_buffer(&mut self, buffer: VertexBuffer) {
        self.vertex_buffer = Some(buffer);
        self.revision += 1;
    }

    pub fn set_index_buffer(&mut self, buffer: IndexBuffer) {
        self.index_buffer = Some(buffer);
        self.revision += 1;
    }

    pub fn vertex_buffer(&self) -> Option<&VertexBuffer> {
        self.vertex_buffer.as_ref()
    }

    pub fn index_buffer(&self) -> Option<&IndexBuffer> {
        self.index_buffer.as_ref()
    }

    /// Index count to draw, or `None` if there is nothing drawable.
    pub fn drawable_index_count(&self) -> Option<u32> {
        self.index_buffer
            .as_ref()
            .map(IndexBuffer::count)
            .filter(|&count| count > 0)
    }

    /// Axis-aligned quad centered at `center` with the given half extents.
    pub fn quad(center: [f32; 2], half_extent: [f32; 2], color: [f32; 4]) -> Self {
        let mut va = Self::new();
        va.set_vertex_buffer(VertexBuffer::quad(center, half_extent, color));
        va.set_index_buffer(IndexBuffer::new(vec![0, 1, 2, 2, 3, 0]));
        va
    }
}

impl Default for VertexArray {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = VertexArray::new();
        let b = VertexArray::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn no_index_buffer_is_not_drawable() {
        let mut va = VertexArray::new();
        assert_eq!(va.drawable_index_count(), None);
        va.set_index_buffer(IndexBuffer::new(Vec::new()));
        assert_eq!(va.drawable_index_count(), None);
    }

    #[test]
    fn mutations_bump_revision() {
        let mut va = VertexArray::new();
        assert_eq!(va.revision(), 0);
        va.set_vertex_buffer(VertexBuffer::new(vec![Vertex::new([0.0; 3], [1.0; 4])]));
        va.set_index_buffer(IndexBuffer::new(vec![0, 0, 0]));
        assert_eq!(va.revision(), 2);
        assert_eq!(va.drawable_index_count(), Some(3));
    }

    #[test]
    fn quad_has_two_triangles() {
        let va = VertexArray::quad([0.0, 0.0], [0.5, 0.5], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(va.vertex_buffer().map(VertexBuffer::len), Some(4));
        assert_eq!(va.drawable_index_count(), Some(6));
    }
}
