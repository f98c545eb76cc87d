mod overlay;
mod sandbox;

use anyhow::Result;
use clap::Parser;
use overlay::DebugOverlay;
use rune_core::{Application, HeadlessWindow, Window, WindowProps};
use rune_platform::DesktopWindow;
use sandbox::SandboxLayer;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "runestone", about = "Rune engine sandbox")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Window title
    #[arg(long, default_value = "Runestone")]
    title: String,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Present without waiting for vertical sync
    #[arg(long)]
    no_vsync: bool,

    /// Run without a native window, recording draw calls only
    #[arg(long)]
    headless: bool,

    /// Stop after this many frames (headless defaults to 60)
    #[arg(long)]
    frames: Option<u64>,
}

impl Cli {
    fn window_props(&self) -> WindowProps {
        WindowProps {
            vsync: !self.no_vsync,
            ..WindowProps::new(self.title.clone(), self.width, self.height)
        }
    }
}

fn run<W: Window>(window: W, frames: Option<u64>) -> Result<u64> {
    let mut app = Application::new(window);
    app.push_layer(SandboxLayer::new());
    app.push_overlay(DebugOverlay::new());

    match frames {
        Some(limit) => {
            while app.is_running() && app.frame_count() < limit {
                app.run_frame()?;
            }
        }
        None => app.run()?,
    }
    Ok(app.frame_count())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("runestone starting");

    let props = cli.window_props();
    let frames = if cli.headless {
        run(HeadlessWindow::new(props), Some(cli.frames.unwrap_or(60)))?
    } else {
        run(DesktopWindow::create(props)?, cli.frames)?
    };

    tracing::info!(frames, "runestone exited");
    Ok(())
}
