use crate::window::{Window, WindowProps};
use rune_events::{Event, EventKind, WindowClose};
use rune_render::{HeadlessRendererApi, RenderCommand};
use std::collections::VecDeque;
use std::convert::Infallible;

/// Window without a display: events are scripted, frames are recorded.
///
/// Queued events are delivered on the next [`on_update`](Window::on_update),
/// the way a native window delivers what accumulated since the last poll.
pub struct HeadlessWindow {
    props: WindowProps,
    queued: VecDeque<Event>,
    ready: Vec<Event>,
    close_after: Option<u64>,
    frames: u64,
    ui_passes: u64,
    egui: egui::Context,
    last_frame: Vec<RenderCommand>,
}

impl HeadlessWindow {
    pub fn new(props: WindowProps) -> Self {
        Self {
            props,
            queued: VecDeque::new(),
            ready: Vec::new(),
            close_after: None,
            frames: 0,
            ui_passes: 0,
            egui: egui::Context::default(),
            last_frame: Vec::new(),
        }
    }

    /// Queue an event for delivery on the next update.
    pub fn push_event(&mut self, event: impl Into<Event>) {
        self.queued.push_back(event.into());
    }

    /// Emit a close event during the `frames`-th update.
    pub fn close_after(&mut self, frames: u64) {
        self.close_after = Some(frames);
    }

    /// Number of completed window updates.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn ui_pass_count(&self) -> u64 {
        self.ui_passes
    }

    /// Commands presented by the most recent update.
    pub fn last_frame(&self) -> &[RenderCommand] {
        &self.last_frame
    }
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        Self::new(WindowProps::default())
    }
}

impl Window for HeadlessWindow {
    type Api = HeadlessRendererApi;
    type Error = Infallible;

    fn title(&self) -> &str {
        &self.props.title
    }

    fn width(&self) -> u32 {
        self.props.width
    }

    fn height(&self) -> u32 {
        self.props.height
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.props.vsync = enabled;
    }

    fn is_vsync(&self) -> bool {
        self.props.vsync
    }

    fn create_renderer_api(&mut self) -> HeadlessRendererApi {
        HeadlessRendererApi::new()
    }

    fn begin_ui(&mut self) -> egui::Context {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(self.props.width as f32, self.props.height as f32),
            )),
            ..Default::default()
        };
        self.egui.begin_pass(input);
        self.egui.clone()
    }

    fn end_ui(&mut self) {
        let _ = self.egui.end_pass();
        self.ui_passes += 1;
    }

    fn on_update(&mut self, api: &mut HeadlessRendererApi) -> Result<(), Infallible> {
        self.last_frame = api.take_commands();
        self.frames += 1;

        self.ready.extend(self.queued.drain(..));
        if self.close_after == Some(self.frames) {
            self.ready.push(Event::from(WindowClose));
        }
        for event in &self.ready {
            if let EventKind::WindowResize(resize) = event.kind {
                self.props.width = resize.width;
                self.props.height = resize.height;
            }
        }
        Ok(())
    }

    fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.ready)
    }
}
