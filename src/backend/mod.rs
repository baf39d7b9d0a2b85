use anyhow::Result;
use std::path::PathBuf;

use crate::input::DrawingMode;
use crate::touch::TouchBackend;

pub mod wayland;

/// Startup choices from the command line; each overrides its config value.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Explicit config file instead of `~/.config/touchscriber/config.toml`
    pub config_path: Option<PathBuf>,
    pub backend: Option<TouchBackend>,
    pub sdk_endpoint: Option<String>,
    pub mode: Option<DrawingMode>,
    pub width: Option<u32>,
}

/// Run Wayland backend with full event loop
pub fn run_wayland(options: RunOptions) -> Result<()> {
    let mut backend = wayland::WaylandBackend::new(options);
    backend.run()
}
