//! Manages the layer surface, the persistent drawing canvas and the shared
//! memory buffers it is presented through.

use anyhow::{Context, Result};
use log::info;
use smithay_client_toolkit::{
    shell::wlr_layer::LayerSurface,
    shm::{Shm, slot::SlotPool},
};

use crate::touch::SurfaceSize;

/// Tracks the active layer surface, canvas, buffer pool, and sizing state.
///
/// Strokes accumulate in `canvas`, an off-screen Cairo image the size of the
/// surface. Every presented frame copies it into a fresh SHM buffer, so an
/// incremental draw never loses what earlier frames painted.
pub struct SurfaceState {
    layer_surface: Option<LayerSurface>,
    canvas: Option<cairo::ImageSurface>,
    pool: Option<SlotPool>,
    width: u32,
    height: u32,
    configured: bool,
}

impl SurfaceState {
    /// Creates a new, unconfigured surface state.
    pub fn new() -> Self {
        Self {
            layer_surface: None,
            canvas: None,
            pool: None,
            width: 0,
            height: 0,
            configured: false,
        }
    }

    /// Assigns the layer surface produced during startup.
    pub fn set_layer_surface(&mut self, surface: LayerSurface) {
        self.layer_surface = Some(surface);
    }

    /// Returns the current layer surface, if initialized.
    pub fn layer_surface(&self) -> Option<&LayerSurface> {
        self.layer_surface.as_ref()
    }

    /// Updates the surface dimensions, returning `true` if the size changed.
    ///
    /// When the size changes, the canvas and buffer pool become invalid and are dropped.
    pub fn update_dimensions(&mut self, width: u32, height: u32) -> bool {
        let changed = self.width != width || self.height != height;
        self.width = width;
        self.height = height;
        if changed {
            self.canvas = None;
            self.pool = None;
        }
        changed
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }

    /// Marks the surface as configured by the compositor.
    pub fn set_configured(&mut self, configured: bool) {
        self.configured = configured;
    }

    /// Returns whether the surface has completed its initial configure.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Returns the canvas, creating it at the current size if needed.
    ///
    /// The flag is `true` when a new (blank) canvas was created, in which case
    /// everything has to be replayed onto it.
    pub fn ensure_canvas(&mut self) -> Result<(cairo::ImageSurface, bool)> {
        if let Some(canvas) = &self.canvas {
            return Ok((canvas.clone(), false));
        }

        info!("Creating {}x{} canvas", self.width, self.height);
        let canvas = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            self.width as i32,
            self.height as i32,
        )
        .context("Failed to create canvas surface")?;
        self.canvas = Some(canvas.clone());
        Ok((canvas, true))
    }

    /// Ensures a shared memory pool of the appropriate size exists.
    pub fn ensure_pool(&mut self, shm: &Shm, buffer_count: usize) -> Result<&mut SlotPool> {
        if self.pool.is_none() {
            let buffer_size = (self.width * self.height * 4) as usize;
            let pool_size = buffer_size * buffer_count;
            info!(
                "Creating new SlotPool ({}x{}, {} bytes, {} buffers)",
                self.width, self.height, pool_size, buffer_count
            );
            let pool = SlotPool::new(pool_size, shm).context("Failed to create slot pool")?;
            self.pool = Some(pool);
        }

        self.pool
            .as_mut()
            .context("Buffer pool not initialized despite previous check")
    }
}
