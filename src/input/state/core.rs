//! Session state shared by every event handler.

use std::collections::HashMap;

use crate::config::{Action, KeyBinding};
use crate::draw::{Color, Palette, Renderer, StrokeRegistry};
use crate::input::{InputModeController, SessionSettings, modifiers::Modifiers};

/// Everything one painting session owns.
///
/// Backends route windowing events into the `on_*` methods and call
/// [`InputState::render`] once per loop iteration. All of it lives on the
/// main loop thread; touch sources on other threads go through the
/// [`LoopQueue`](crate::touch::LoopQueue) instead of touching this directly.
pub struct InputState {
    /// Active and finished strokes
    pub registry: StrokeRegistry,
    /// Drawing mode and stroke width, driven by keybindings
    pub controller: InputModeController,
    /// Stroke renderer holding the per-contact palette
    pub renderer: Renderer,
    /// Color the surface is wiped to on a full repaint
    pub background: Color,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Whether user requested to exit
    pub should_exit: bool,
    /// Whether something new has to be drawn
    pub needs_redraw: bool,
    /// Whether the next draw has to wipe and replay every stroke
    pub needs_full_redraw: bool,
    /// No contact is touching the surface; the host loop may sleep
    pub idle: bool,
}

impl InputState {
    /// Creates a new InputState with specified defaults.
    ///
    /// The first render is always a full repaint.
    pub fn with_defaults(
        settings: SessionSettings,
        action_map: HashMap<KeyBinding, Action>,
        palette: Palette,
        background: Color,
    ) -> Self {
        Self {
            registry: StrokeRegistry::new(),
            controller: InputModeController::new(settings, action_map),
            renderer: Renderer::new(palette),
            background,
            modifiers: Modifiers::new(),
            should_exit: false,
            needs_redraw: true,
            needs_full_redraw: true,
            idle: true,
        }
    }

    /// Surface exposed or resized: replay everything on the next draw.
    pub fn on_expose(&mut self) {
        self.needs_full_redraw = true;
        self.needs_redraw = true;
    }

    /// Replaces the modifier state with what the compositor reports.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn settings(&self) -> &SessionSettings {
        self.controller.settings()
    }

    pub(super) fn refresh_idle(&mut self) {
        self.idle = self.registry.is_idle();
    }
}
