use crate::error::PlatformError;
use crate::gpu::GpuContext;
use crate::translate::{mark_ui_consumed, translate_window_event};
use crate::ui::UiState;
use rune_core::{Window, WindowProps};
use rune_events::{Event, WindowClose};
use rune_render_wgpu::WgpuRendererApi;
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::WindowId;

/// Event loop iterations allowed for the platform to deliver `resumed`.
const MAX_STARTUP_PUMPS: u32 = 200;
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(5);
/// How long a minimized window blocks waiting for OS events each frame.
const MINIMIZED_PUMP_TIMEOUT: Duration = Duration::from_millis(16);

/// A visible window polls without blocking; a zero-area one waits for events.
fn pump_timeout(size: PhysicalSize<u32>) -> Duration {
    if size.width == 0 || size.height == 0 {
        MINIMIZED_PUMP_TIMEOUT
    } else {
        Duration::ZERO
    }
}

fn skip_frame(api: &mut WgpuRendererApi, reason: &str) {
    tracing::trace!(dropped = api.pending_commands(), reason, "frame skipped");
    api.discard();
}

/// winit-side state: receives OS callbacks while the loop is pumped.
struct WindowState {
    props: WindowProps,
    window: Option<Arc<winit::window::Window>>,
    gpu: Option<GpuContext>,
    ui: Option<UiState>,
    egui_ctx: egui::Context,
    size: PhysicalSize<u32>,
    events: Vec<Event>,
    init_error: Option<PlatformError>,
}

impl WindowState {
    fn new(props: WindowProps) -> Self {
        Self {
            size: PhysicalSize::new(props.width, props.height),
            props,
            window: None,
            gpu: None,
            ui: None,
            egui_ctx: egui::Context::default(),
            events: Vec::new(),
            init_error: None,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let attrs = winit::window::Window::default_attributes()
            .with_title(self.props.title.clone())
            .with_inner_size(PhysicalSize::new(self.props.width, self.props.height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let gpu = GpuContext::new(window.clone(), self.props.vsync)?;
        let ui = UiState::new(self.egui_ctx.clone(), &window, &gpu);

        self.size = window.inner_size();
        self.window = Some(window);
        self.gpu = Some(gpu);
        self.ui = Some(ui);
        tracing::info!(
            title = %self.props.title,
            width = self.size.width,
            height = self.size.height,
            "window created"
        );
        Ok(())
    }

    fn present(&mut self, api: &mut WgpuRendererApi) -> Result<(), PlatformError> {
        let (Some(gpu), Some(ui)) = (self.gpu.as_mut(), self.ui.as_mut()) else {
            skip_frame(api, "no surface");
            return Ok(());
        };
        if self.size.width == 0 || self.size.height == 0 {
            skip_frame(api, "minimized");
            return Ok(());
        }
        let Some(frame) = gpu.acquire()? else {
            skip_frame(api, "no frame");
            return Ok(());
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        api.flush(&view, gpu.config.width, gpu.config.height);
        ui.paint(gpu, &view);
        frame.present();
        Ok(())
    }
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            tracing::error!("window initialization failed: {e}");
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let consumed = match (self.ui.as_mut(), self.window.as_ref()) {
            (Some(ui), Some(window)) => ui.on_window_event(window, &event),
            _ => false,
        };

        if let WindowEvent::Resized(size) = event {
            self.size = size;
            if let Some(gpu) = self.gpu.as_mut() {
                gpu.resize(size.width, size.height);
            }
        }

        let mut translated = translate_window_event(&event);
        if consumed {
            mark_ui_consumed(&mut translated);
        }
        self.events.extend(translated);
    }
}

/// Native desktop window with a wgpu surface and egui UI pass.
///
/// The winit loop is pumped from [`Window::on_update`], so the application
/// keeps ownership of the frame loop.
pub struct DesktopWindow {
    event_loop: EventLoop<()>,
    state: WindowState,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    surface_format: wgpu::TextureFormat,
    exited: bool,
}

impl DesktopWindow {
    /// Open the window and initialize the GPU. Blocks until the platform has
    /// delivered the first `resumed` callback.
    pub fn create(props: WindowProps) -> Result<Self, PlatformError> {
        let mut event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        let mut state = WindowState::new(props);

        let mut pumps = 0;
        while state.gpu.is_none() {
            if pumps == MAX_STARTUP_PUMPS {
                return Err(PlatformError::NotResumed(pumps));
            }
            let status = event_loop.pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut state);
            if let Some(e) = state.init_error.take() {
                return Err(e);
            }
            if let PumpStatus::Exit(code) = status {
                return Err(PlatformError::Exited(code));
            }
            pumps += 1;
        }

        let Some(gpu) = state.gpu.as_ref() else {
            return Err(PlatformError::NotResumed(pumps));
        };
        let device = gpu.device.clone();
        let queue = gpu.queue.clone();
        let surface_format = gpu.config.format;

        Ok(Self {
            event_loop,
            state,
            device,
            queue,
            surface_format,
            exited: false,
        })
    }

    pub fn native(&self) -> Option<&winit::window::Window> {
        self.state.window.as_deref()
    }
}

impl Window for DesktopWindow {
    type Api = WgpuRendererApi;
    type Error = PlatformError;

    fn title(&self) -> &str {
        &self.state.props.title
    }

    fn width(&self) -> u32 {
        self.state.size.width
    }

    fn height(&self) -> u32 {
        self.state.size.height
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.state.props.vsync = enabled;
        if let Some(gpu) = self.state.gpu.as_mut() {
            gpu.set_vsync(enabled);
        }
        tracing::debug!(enabled, "vsync");
    }

    fn is_vsync(&self) -> bool {
        self.state.props.vsync
    }

    fn create_renderer_api(&mut self) -> WgpuRendererApi {
        WgpuRendererApi::new(self.device.clone(), self.queue.clone(), self.surface_format)
    }

    fn begin_ui(&mut self) -> egui::Context {
        match (self.state.ui.as_mut(), self.state.window.as_ref()) {
            (Some(ui), Some(window)) => ui.begin(window),
            _ => self.state.egui_ctx.begin_pass(egui::RawInput::default()),
        }
        self.state.egui_ctx.clone()
    }

    fn end_ui(&mut self) {
        match (self.state.ui.as_mut(), self.state.window.as_ref()) {
            (Some(ui), Some(window)) => ui.end(window),
            _ => {
                let _ = self.state.egui_ctx.end_pass();
            }
        }
    }

    fn on_update(&mut self, api: &mut WgpuRendererApi) -> Result<(), PlatformError> {
        self.state.present(api)?;

        let timeout = pump_timeout(self.state.size);
        let status = self
            .event_loop
            .pump_app_events(Some(timeout), &mut self.state);
        if let PumpStatus::Exit(code) = status {
            if !self.exited {
                tracing::debug!(code, "event loop exited");
                self.exited = true;
                self.state.events.push(WindowClose.into());
            }
        }
        Ok(())
    }

    fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.state.events)
    }
}
