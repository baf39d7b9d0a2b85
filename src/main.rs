use clap::Parser;
use std::path::PathBuf;

use touchscriber::backend::{self, RunOptions};
use touchscriber::input::DrawingMode;
use touchscriber::touch::TouchBackend;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TOUCHSCRIBER_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "touchscriber")]
#[command(version = VERSION, about = "Multi-touch finger painting for Wayland compositors")]
struct Cli {
    /// Touch source: native (compositor multi-touch) or sdk (gesture server)
    #[arg(long, short = 'b', value_name = "BACKEND")]
    backend: Option<TouchBackend>,

    /// Gesture server Unix socket, or "-" for stdin (implies nothing unless --backend sdk)
    #[arg(long, value_name = "PATH")]
    sdk_endpoint: Option<String>,

    /// Initial drawing mode (draw, line, or dot)
    #[arg(long, short = 'm', value_name = "MODE", value_parser = parse_mode)]
    mode: Option<DrawingMode>,

    /// Initial stroke width in pixels
    #[arg(long, short = 'w', value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Read settings from this file instead of ~/.config/touchscriber/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

fn parse_mode(value: &str) -> Result<DrawingMode, String> {
    value
        .parse()
        .map_err(|_| format!("unknown mode '{value}' (expected draw, line, or dot)"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Check for Wayland environment
    if std::env::var("WAYLAND_DISPLAY").is_err() {
        log::error!("WAYLAND_DISPLAY not set - this application requires Wayland.");
        log::error!("Please run on a Wayland compositor (Hyprland, Sway, etc.).");
        return Err(anyhow::anyhow!("Wayland environment required"));
    }

    log::info!("Starting touchscriber...");
    log::info!("Controls (defaults):");
    log::info!("  - Draw: touch with any number of fingers");
    log::info!("  - Modes: D (free draw), L (polyline), P (dots)");
    log::info!("  - Width: H (wider), T (narrower)");
    log::info!("  - Clear: Space");
    log::info!("  - Exit: Escape or Ctrl+Q");

    backend::run_wayland(RunOptions {
        config_path: cli.config,
        backend: cli.backend,
        sdk_endpoint: cli.sdk_endpoint,
        mode: cli.mode,
        width: cli.width,
    })?;

    log::info!("touchscriber closed.");
    Ok(())
}
