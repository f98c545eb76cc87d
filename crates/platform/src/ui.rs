use crate::gpu::GpuContext;
use winit::event::WindowEvent;
use winit::window::Window;

/// Tessellated output of one UI pass, waiting to be painted.
struct UiFrame {
    primitives: Vec<egui::ClippedPrimitive>,
    textures: egui::TexturesDelta,
    pixels_per_point: f32,
}

/// egui bound to one window: input translation plus the wgpu painter.
pub(crate) struct UiState {
    ctx: egui::Context,
    winit: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    pending: Option<UiFrame>,
}

impl UiState {
    pub fn new(ctx: egui::Context, window: &Window, gpu: &GpuContext) -> Self {
        let winit = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);
        Self {
            ctx,
            winit,
            renderer,
            pending: None,
        }
    }

    /// Feed a window event to egui. Returns true if egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.winit.on_window_event(window, event).consumed
    }

    pub fn begin(&mut self, window: &Window) {
        let raw_input = self.winit.take_egui_input(window);
        self.ctx.begin_pass(raw_input);
    }

    pub fn end(&mut self, window: &Window) {
        let output = self.ctx.end_pass();
        self.winit
            .handle_platform_output(window, output.platform_output);
        let primitives = self.ctx.tessellate(output.shapes, output.pixels_per_point);

        // Texture updates of an unpainted frame must still reach the GPU.
        let mut textures = output.textures_delta;
        if let Some(skipped) = self.pending.take() {
            let mut merged = skipped.textures;
            merged.append(textures);
            textures = merged;
        }

        self.pending = Some(UiFrame {
            primitives,
            textures,
            pixels_per_point: output.pixels_per_point,
        });
    }

    /// Paint the pending UI frame on top of `view`.
    pub fn paint(&mut self, gpu: &GpuContext, view: &wgpu::TextureView) {
        let Some(frame) = self.pending.take() else {
            return;
        };
        let device = gpu.device.as_ref();
        let queue = gpu.queue.as_ref();

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: frame.pixels_per_point,
        };

        for (id, image_delta) in &frame.textures.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        self.renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &frame.primitives,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.renderer
                .render(&mut pass, &frame.primitives, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &frame.textures.free {
            self.renderer.free_texture(id);
        }
    }
}
