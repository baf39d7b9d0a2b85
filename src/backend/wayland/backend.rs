// Coordinates backend startup/shutdown and drives the event loop while delegating
// rendering & protocol state to `WaylandState` and its handler modules.
use anyhow::{Context, Result};
use log::{debug, info, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::{
        WaylandSurface,
        wlr_layer::{Anchor, KeyboardInteractivity, Layer, LayerShell},
    },
    shm::Shm,
};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use wayland_client::{
    Connection, EventQueue, backend::WaylandError, globals::registry_queue_init,
};

use super::state::WaylandState;
use crate::{
    backend::RunOptions,
    config::Config,
    draw::Palette,
    input::{InputState, SessionSettings},
    touch::{LoopEvent, LoopQueue, SdkAdapter, SdkTouchSource, TouchBackend},
};

const MAX_RENDER_FAILURES: u32 = 10;

/// Wayland backend state
pub struct WaylandBackend {
    options: RunOptions,
}

impl WaylandBackend {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    fn load_config(&self) -> Result<Config> {
        match &self.options.config_path {
            Some(path) => Config::load_from(path),
            None => Ok(Config::load().unwrap_or_else(|e| {
                warn!("Failed to load config: {}. Using defaults.", e);
                Config::default()
            })),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        info!("Starting Wayland backend");

        let mut config = self.load_config()?;
        if let Some(backend) = self.options.backend {
            config.touch.backend = backend;
        }
        if let Some(endpoint) = &self.options.sdk_endpoint {
            config.touch.sdk_endpoint = endpoint.clone();
        }
        let settings = SessionSettings {
            mode: self.options.mode.unwrap_or(config.drawing.default_mode),
            stroke_width: self
                .options
                .width
                .unwrap_or(config.drawing.default_width)
                .max(1),
        };
        info!("Configuration loaded");
        debug!("  Touch backend: {}", config.touch.backend);
        debug!("  Mode: {}", settings.mode.label());
        debug!("  Width: {}px", settings.stroke_width);
        debug!("  Palette size: {}", config.drawing.palette_size);
        debug!("  Buffer count: {}", config.performance.buffer_count);

        // Build keybinding action map
        let action_map = config
            .keybindings
            .build_action_map()
            .context("Invalid keybinding configuration")?;

        let input_state = InputState::with_defaults(
            settings,
            action_map,
            Palette::generate(config.drawing.palette_size),
            config.drawing.background.to_color(),
        );

        // Connect to Wayland compositor
        let conn =
            Connection::connect_to_env().context("Failed to connect to Wayland compositor")?;
        debug!("Connected to Wayland display");

        // Initialize registry and event queue
        let (globals, mut event_queue) =
            registry_queue_init(&conn).context("Failed to initialize Wayland registry")?;
        let qh = event_queue.handle();

        // Bind global interfaces
        let compositor_state =
            CompositorState::bind(&globals, &qh).context("wl_compositor not available")?;
        debug!("Bound compositor");

        let layer_shell =
            LayerShell::bind(&globals, &qh).context("zwlr_layer_shell_v1 not available")?;
        debug!("Bound layer shell");

        let shm = Shm::bind(&globals, &qh).context("wl_shm not available")?;
        debug!("Bound shared memory");

        let output_state = OutputState::new(&globals, &qh);
        let seat_state = SeatState::new(&globals, &qh);
        let registry_state = RegistryState::new(&globals);

        // SDK gestures arrive on a listener thread and are handed over through the loop queue
        let (sender, loop_queue) = LoopQueue::new();
        let sdk_source = match config.touch.backend {
            TouchBackend::Sdk => Some(SdkTouchSource::connect(
                &config.touch.sdk_endpoint,
                SdkAdapter::new(config.touch.sdk_extent),
                sender,
            )?),
            TouchBackend::Native => {
                drop(sender);
                None
            }
        };

        let idle_sleep = Duration::from_millis(config.performance.idle_sleep_ms);
        let touch_backend = config.touch.backend;

        // Create application state
        let mut state = WaylandState::new(
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            config,
            input_state,
            touch_backend,
        );

        // Create layer shell surface
        info!("Creating layer shell surface");
        let wl_surface = state.compositor_state.create_surface(&qh);
        let layer_surface = state.layer_shell.create_layer_surface(
            &qh,
            wl_surface,
            Layer::Overlay,
            Some("touchscriber"),
            None, // Default output
        );

        // Fullscreen, opaque, and grabs the keyboard
        layer_surface.set_anchor(Anchor::all());
        layer_surface.set_keyboard_interactivity(KeyboardInteractivity::Exclusive);
        layer_surface.set_size(0, 0); // Use full screen size
        layer_surface.set_exclusive_zone(-1);
        layer_surface.commit();

        state.surface.set_layer_surface(layer_surface);
        info!("Layer shell surface created");

        let signalled = Arc::new(AtomicBool::new(false));
        for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
            signal_hook::flag::register(signal, Arc::clone(&signalled))
                .context("Failed to register signal handler")?;
        }

        // Track consecutive render failures for error recovery
        let mut consecutive_render_failures = 0u32;

        // Main event loop: never blocks on the Wayland socket so SDK touches
        // keep flowing while the compositor is quiet.
        let mut loop_error: Option<anyhow::Error> = None;
        loop {
            if state.input_state.should_exit {
                info!("Exit requested, breaking event loop");
                break;
            }
            if signalled.load(Ordering::Relaxed) {
                info!("Termination signal received, breaking event loop");
                break;
            }

            if let Err(e) = pump_wayland(&conn, &mut event_queue, &mut state) {
                warn!("Event queue error: {}", e);
                loop_error = Some(e);
                break;
            }

            for event in loop_queue.drain() {
                match event {
                    LoopEvent::Touch(touch) => {
                        state.input_state.on_touch(touch);
                    }
                    LoopEvent::SourceClosed => {
                        info!("Gesture source closed; keyboard still active");
                    }
                }
            }

            match state.render() {
                Ok(kind) => {
                    consecutive_render_failures = 0;
                    debug!("Main loop: render {:?}", kind);
                }
                Err(e) => {
                    consecutive_render_failures += 1;
                    warn!(
                        "Rendering error (attempt {}/{}): {}",
                        consecutive_render_failures, MAX_RENDER_FAILURES, e
                    );

                    if consecutive_render_failures >= MAX_RENDER_FAILURES {
                        return Err(anyhow::anyhow!(
                            "Too many consecutive render failures ({}), exiting: {}",
                            consecutive_render_failures,
                            e
                        ));
                    }

                    // The canvas may be ahead of what was presented
                    state.input_state.on_expose();
                }
            }

            if state.input_state.idle {
                thread::sleep(idle_sleep);
            } else {
                thread::yield_now();
            }
        }

        info!("Wayland backend exiting");
        if let Some(source) = sdk_source {
            if source.is_finished() {
                let _ = source.join();
            } else {
                // Blocked in a read; it ends with the process.
                debug!("Leaving gesture listener thread detached");
            }
        }

        // Return error if loop exited due to error, otherwise success
        match loop_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Flushes requests, reads whatever the socket holds without blocking, and
/// dispatches the queued events.
fn pump_wayland(
    conn: &Connection,
    event_queue: &mut EventQueue<WaylandState>,
    state: &mut WaylandState,
) -> Result<()> {
    match conn.flush() {
        Ok(()) => {}
        Err(WaylandError::Io(e)) if e.kind() == io::ErrorKind::WouldBlock => {}
        Err(e) => return Err(anyhow::anyhow!("Wayland flush failed: {}", e)),
    }

    if let Some(guard) = event_queue.prepare_read() {
        match guard.read() {
            Ok(_) => {}
            Err(WaylandError::Io(e)) if e.kind() == io::ErrorKind::WouldBlock => {}
            Err(e) => return Err(anyhow::anyhow!("Wayland read failed: {}", e)),
        }
    }

    event_queue
        .dispatch_pending(state)
        .context("Wayland event queue error")?;
    Ok(())
}
