use rune_events::Event;
use rune_render::RendererApi;

/// Window creation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowProps {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowProps {
    fn default() -> Self {
        Self {
            title: "Rune Engine".into(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

impl WindowProps {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            ..Default::default()
        }
    }
}

/// The native display surface the application runs in.
///
/// A window also owns the immediate-mode UI pass and creates the renderer
/// backend bound to its surface. Events are queued while the window updates
/// and handed to the application through [`drain_events`](Self::drain_events).
pub trait Window {
    /// Renderer backend drawing into this window.
    type Api: RendererApi;
    type Error: std::error::Error + Send + Sync + 'static;

    fn title(&self) -> &str;
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn set_vsync(&mut self, enabled: bool);
    fn is_vsync(&self) -> bool;

    fn create_renderer_api(&mut self) -> Self::Api;

    /// Open the UI pass for this frame and return its context.
    fn begin_ui(&mut self) -> egui::Context;

    /// Close the UI pass opened by [`begin_ui`](Self::begin_ui).
    fn end_ui(&mut self);

    /// Present the frame recorded in `api`, then poll the platform for events.
    fn on_update(&mut self, api: &mut Self::Api) -> Result<(), Self::Error>;

    /// Take the events queued by the last [`on_update`](Self::on_update).
    fn drain_events(&mut self) -> Vec<Event>;
}
