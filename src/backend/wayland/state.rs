// Holds the live Wayland protocol state shared by the backend loop and the handler
// submodules; owns the painting session and presents its canvas.
use anyhow::{Context, Result};
use log::debug;
use smithay_client_toolkit::{
    compositor::CompositorState, output::OutputState, registry::RegistryState, seat::SeatState,
    shell::{WaylandSurface, wlr_layer::LayerShell}, shm::Shm,
};
use wayland_client::protocol::wl_shm;

use crate::{
    config::Config,
    draw::CairoSurface,
    input::{InputState, RedrawKind},
    touch::{NativeAdapter, NativeTouch, NativeTouchKind, TouchAdapter, TouchBackend},
};

use super::surface::SurfaceState;

/// Internal Wayland state shared across modules.
pub(super) struct WaylandState {
    // Wayland protocol objects
    pub(super) registry_state: RegistryState,
    pub(super) compositor_state: CompositorState,
    pub(super) layer_shell: LayerShell,
    pub(super) shm: Shm,
    pub(super) output_state: OutputState,
    pub(super) seat_state: SeatState,

    // Surface, canvas and buffer management
    pub(super) surface: SurfaceState,

    // Configuration
    pub(super) config: Config,

    // Painting session
    pub(super) input_state: InputState,

    // Compositor multi-touch, only requested when it is the selected backend
    pub(super) touch_backend: TouchBackend,
    pub(super) native_touch: NativeAdapter,
}

impl WaylandState {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        registry_state: RegistryState,
        compositor_state: CompositorState,
        layer_shell: LayerShell,
        shm: Shm,
        output_state: OutputState,
        seat_state: SeatState,
        config: Config,
        input_state: InputState,
        touch_backend: TouchBackend,
    ) -> Self {
        Self {
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            surface: SurfaceState::new(),
            config,
            input_state,
            touch_backend,
            native_touch: NativeAdapter::new(),
        }
    }

    /// Feeds one compositor touch sample through the native adapter.
    pub(super) fn handle_native_touch(&mut self, raw: NativeTouch) {
        if let Some(event) = self.native_touch.translate(raw) {
            self.input_state.on_touch(event);
        }
    }

    /// Compositor took every touch point back: end them all.
    pub(super) fn cancel_native_touches(&mut self) {
        for event in self.native_touch.cancel_all(self.surface.size()) {
            self.input_state.on_touch(event);
        }
    }

    pub(super) fn native_touch_sample(
        &self,
        id: i32,
        kind: NativeTouchKind,
        position: Option<(f64, f64)>,
    ) -> NativeTouch {
        NativeTouch {
            id,
            kind,
            position,
            surface: self.surface.size(),
        }
    }

    /// Draws pending strokes into the canvas and presents it.
    ///
    /// Does nothing until the compositor has configured the surface.
    pub(super) fn render(&mut self) -> Result<RedrawKind> {
        let size = self.surface.size();
        if !self.surface.is_configured() || size.is_empty() {
            return Ok(RedrawKind::Skipped);
        }

        let (canvas, created) = self.surface.ensure_canvas()?;
        if created {
            self.input_state.on_expose();
        }

        let kind = {
            let ctx = cairo::Context::new(&canvas).context("Failed to create Cairo context")?;
            let mut target = CairoSurface::new(&ctx, size);
            self.input_state.render(&mut target)
        };
        if kind == RedrawKind::Skipped {
            return Ok(kind);
        }
        canvas.flush();

        let buffer_count = self.config.performance.buffer_count as usize;
        let width = size.width;
        let height = size.height;

        // Get a buffer from the pool
        let (buffer, pixels) = {
            let pool = self.surface.ensure_pool(&self.shm, buffer_count)?;
            pool.create_buffer(
                width as i32,
                height as i32,
                (width * 4) as i32,
                wl_shm::Format::Argb8888,
            )
            .context("Failed to create buffer")?
        };

        // SAFETY: `pixels` is a mutable slice from SlotPool holding exactly
        // width * height * 4 bytes laid out as ARGB32 with a stride of width * 4.
        // `frame` and `ctx` are dropped before the buffer is attached, so Cairo
        // never touches the memory after ownership moves to the compositor.
        let frame = unsafe {
            cairo::ImageSurface::create_for_data_unsafe(
                pixels.as_mut_ptr(),
                cairo::Format::ARgb32,
                width as i32,
                height as i32,
                (width * 4) as i32,
            )
            .context("Failed to create Cairo surface")?
        };

        let ctx = cairo::Context::new(&frame).context("Failed to create Cairo context")?;
        ctx.set_operator(cairo::Operator::Source);
        ctx.set_source_surface(&canvas, 0.0, 0.0)
            .context("Failed to set canvas as source")?;
        ctx.paint().context("Failed to copy canvas")?;
        frame.flush();
        drop(ctx);
        drop(frame);

        debug!("Presenting {:?} frame", kind);
        let wl_surface = self
            .surface
            .layer_surface()
            .context("Layer surface not created")?
            .wl_surface();
        wl_surface.attach(Some(buffer.wl_buffer()), 0, 0);
        wl_surface.damage_buffer(0, 0, width as i32, height as i32);
        wl_surface.commit();

        Ok(kind)
    }
}
