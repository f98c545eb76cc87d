use crate::pass::{DrawCall, FrameCommand, MeshKey, plan_passes};
use crate::shaders;
use glam::Vec4;
use rune_render::{Backend, BlendMode, RendererApi, Vertex, VertexArray, VertexArrayId, Viewport};
use std::collections::HashMap;
use std::sync::Arc;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Meshes not drawn for this many flushes are released.
const MESH_IDLE_FRAMES: u64 = 240;

struct GpuMesh {
    last_used: u64,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct DepthTarget {
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

/// wgpu implementation of [`RendererApi`].
///
/// Calls are recorded during the frame; [`flush`](Self::flush) encodes and
/// submits them against the frame's target texture.
pub struct WgpuRendererApi {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    surface_format: wgpu::TextureFormat,
    shader: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<BlendMode, wgpu::RenderPipeline>,
    meshes: HashMap<MeshKey, GpuMesh>,
    depth: Option<DepthTarget>,
    clear_color: Vec4,
    blend: BlendMode,
    viewport: Option<Viewport>,
    commands: Vec<FrameCommand>,
    frame: u64,
}

impl WgpuRendererApi {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("color_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::COLOR_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("color_pipeline_layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        Self {
            device,
            queue,
            surface_format,
            shader,
            pipeline_layout,
            pipelines: HashMap::new(),
            meshes: HashMap::new(),
            depth: None,
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            blend: BlendMode::Opaque,
            viewport: None,
            commands: Vec::new(),
            frame: 0,
        }
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Number of commands recorded since the last flush.
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Drop everything recorded this frame without drawing.
    pub fn discard(&mut self) {
        self.commands.clear();
        self.end_frame();
    }

    /// Encode and submit the recorded frame into `target`.
    pub fn flush(&mut self, target: &wgpu::TextureView, width: u32, height: u32) {
        let commands = std::mem::take(&mut self.commands);
        if !commands.is_empty() {
            self.encode(&commands, target, width, height);
        }
        self.end_frame();
    }

    fn encode(
        &mut self,
        commands: &[FrameCommand],
        target: &wgpu::TextureView,
        width: u32,
        height: u32,
    ) {
        self.ensure_depth(width, height);
        for command in commands {
            if let FrameCommand::Draw(draw) = command {
                self.ensure_pipeline(draw.blend);
            }
        }

        let Some(depth) = &self.depth else {
            return;
        };
        let passes = plan_passes(commands);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("renderer_encoder"),
            });

        for plan in &passes {
            let (color_load, depth_load) = match plan.clear {
                Some(c) => (
                    wgpu::LoadOp::Clear(wgpu::Color {
                        r: c.x as f64,
                        g: c.y as f64,
                        b: c.z as f64,
                        a: c.w as f64,
                    }),
                    wgpu::LoadOp::Clear(1.0),
                ),
                None => (wgpu::LoadOp::Load, wgpu::LoadOp::Load),
            };

            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("renderer_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: color_load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: depth_load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            for draw in &plan.draws {
                self.encode_draw(&mut pass, draw, width, height);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    fn encode_draw(&self, pass: &mut wgpu::RenderPass<'_>, draw: &DrawCall, width: u32, height: u32) {
        let (Some(mesh), Some(pipeline)) = (
            self.meshes.get(&draw.mesh_key()),
            self.pipelines.get(&draw.blend),
        ) else {
            return;
        };
        let viewport = match draw.viewport {
            Some(vp) => match vp.clamped(width, height) {
                Some(vp) => vp,
                None => {
                    tracing::trace!(?vp, "draw skipped: viewport outside target");
                    return;
                }
            },
            None => Viewport::new(0, 0, width, height),
        };

        pass.set_viewport(
            viewport.x as f32,
            viewport.y as f32,
            viewport.width as f32,
            viewport.height as f32,
            0.0,
            1.0,
        );
        pass.set_pipeline(pipeline);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..draw.index_count.min(mesh.index_count), 0, 0..1);
    }

    /// Upload or refresh GPU buffers for `vertex_array`. Returns false when it
    /// has no vertex data to draw.
    fn upload(&mut self, vertex_array: &VertexArray) -> bool {
        let (Some(vertices), Some(indices)) =
            (vertex_array.vertex_buffer(), vertex_array.index_buffer())
        else {
            return false;
        };
        if vertices.is_empty() {
            return false;
        }

        let key = (vertex_array.id(), vertex_array.revision());
        let frame = self.frame;
        if let Some(mesh) = self.meshes.get_mut(&key) {
            mesh.last_used = frame;
            return true;
        }

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("vertex_array_vertices"),
                contents: bytemuck::cast_slice(vertices.vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("vertex_array_indices"),
                contents: bytemuck::cast_slice(indices.indices()),
                usage: wgpu::BufferUsages::INDEX,
            });

        tracing::trace!(
            id = vertex_array.id().0,
            revision = vertex_array.revision(),
            "uploaded vertex array"
        );
        self.meshes.insert(
            key,
            GpuMesh {
                last_used: frame,
                vertex_buffer,
                index_buffer,
                index_count: indices.count(),
            },
        );
        true
    }

    /// Release meshes superseded by a newer revision or idle too long.
    /// Runs after submission, so every revision drawn this frame was encoded.
    fn end_frame(&mut self) {
        self.frame += 1;
        prune_meshes(&mut self.meshes, self.frame, |mesh| mesh.last_used);
    }

    fn ensure_depth(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if let Some(depth) = &self.depth {
            if depth.width == width && depth.height == height {
                return;
            }
        }
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        self.depth = Some(DepthTarget {
            view: texture.create_view(&Default::default()),
            width,
            height,
        });
    }

    fn ensure_pipeline(&mut self, blend: BlendMode) {
        if self.pipelines.contains_key(&blend) {
            return;
        }
        let blend_state = match blend {
            BlendMode::Opaque => wgpu::BlendState::REPLACE,
            BlendMode::Alpha => wgpu::BlendState::ALPHA_BLENDING,
        };
        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("color_pipeline"),
                layout: Some(&self.pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &self.shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x4,
                        ],
                    }],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &self.shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.surface_format,
                        blend: Some(blend_state),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: Default::default(),
                    bias: Default::default(),
                }),
                multisample: Default::default(),
                multiview: None,
                cache: None,
            });
        tracing::debug!(?blend, "created color pipeline");
        self.pipelines.insert(blend, pipeline);
    }
}

impl RendererApi for WgpuRendererApi {
    fn init(&mut self) {
        self.blend = BlendMode::Alpha;
    }

    fn set_clear_color(&mut self, color: Vec4) {
        self.clear_color = color;
    }

    fn clear(&mut self) {
        self.commands.push(FrameCommand::Clear(self.clear_color));
    }

    fn draw_indexed(&mut self, vertex_array: &VertexArray) {
        let Some(index_count) = vertex_array.drawable_index_count() else {
            tracing::trace!(id = vertex_array.id().0, "draw skipped: no index buffer");
            return;
        };
        if !self.upload(vertex_array) {
            tracing::trace!(id = vertex_array.id().0, "draw skipped: no vertex data");
            return;
        }
        self.commands.push(FrameCommand::Draw(DrawCall {
            vertex_array: vertex_array.id(),
            revision: vertex_array.revision(),
            index_count,
            blend: self.blend,
            viewport: self.viewport,
        }));
    }

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.viewport = Some(Viewport::new(x, y, width, height));
    }

    fn backend(&self) -> Backend {
        Backend::Wgpu
    }
}

fn prune_meshes<M>(
    meshes: &mut HashMap<MeshKey, M>,
    frame: u64,
    last_used: impl Fn(&M) -> u64,
) {
    let mut latest: HashMap<VertexArrayId, u64> = HashMap::new();
    for &(id, revision) in meshes.keys() {
        let entry = latest.entry(id).or_insert(revision);
        *entry = (*entry).max(revision);
    }
    meshes.retain(|(id, revision), mesh| {
        latest.get(id) == Some(revision)
            && frame.saturating_sub(last_used(mesh)) <= MESH_IDLE_FRAMES
    });
}
