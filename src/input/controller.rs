//! Session settings driven by the keyboard.

use log::{debug, info};
use std::collections::HashMap;

use super::events::Key;
use super::mode::DrawingMode;
use super::modifiers::Modifiers;
use crate::config::{Action, KeyBinding};

/// Mutable settings every draw call reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub mode: DrawingMode,
    /// Line width / dot diameter in pixels, always at least 1.
    pub stroke_width: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            mode: DrawingMode::FreeDraw,
            stroke_width: 1,
        }
    }
}

/// What the caller has to do after a controller action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEffect {
    /// Settings changed in place; they apply from the next draw.
    SettingsChanged,
    /// All strokes must be dropped and the surface blanked.
    ClearCanvas,
    /// The session should end.
    Exit,
}

/// Holds the drawing mode and stroke width and maps keys onto actions.
pub struct InputModeController {
    settings: SessionSettings,
    action_map: HashMap<KeyBinding, Action>,
}

impl InputModeController {
    pub fn new(settings: SessionSettings, action_map: HashMap<KeyBinding, Action>) -> Self {
        let settings = SessionSettings {
            stroke_width: settings.stroke_width.max(1),
            ..settings
        };
        Self {
            settings,
            action_map,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn mode(&self) -> DrawingMode {
        self.settings.mode
    }

    pub fn stroke_width(&self) -> u32 {
        self.settings.stroke_width
    }

    /// Resolves a key plus the held modifiers to a bound action.
    pub fn action_for(&self, key: Key, modifiers: Modifiers) -> Option<Action> {
        let name = key.binding_name()?;
        self.action_map.iter().find_map(|(binding, action)| {
            binding
                .matches(&name, modifiers.ctrl, modifiers.shift, modifiers.alt)
                .then_some(*action)
        })
    }

    pub fn set_mode(&mut self, mode: DrawingMode) {
        if self.settings.mode != mode {
            info!("Drawing mode: {}", mode.label());
        }
        self.settings.mode = mode;
    }

    pub fn grow(&mut self) {
        self.settings.stroke_width = self.settings.stroke_width.saturating_add(1);
        debug!("Stroke width increased: {}px", self.settings.stroke_width);
    }

    /// Narrows the stroke by one pixel, never below 1.
    pub fn shrink(&mut self) {
        self.settings.stroke_width = self.settings.stroke_width.saturating_sub(1).max(1);
        debug!("Stroke width decreased: {}px", self.settings.stroke_width);
    }

    /// Performs an action, reporting what the caller still has to do.
    pub fn apply(&mut self, action: Action) -> ControlEffect {
        match action {
            Action::FreeDrawMode => self.set_mode(DrawingMode::FreeDraw),
            Action::PolylineMode => self.set_mode(DrawingMode::PolylineOnly),
            Action::DotMode => self.set_mode(DrawingMode::DotOnly),
            Action::IncreaseWidth => self.grow(),
            Action::DecreaseWidth => self.shrink(),
            Action::ClearCanvas => return ControlEffect::ClearCanvas,
            Action::Exit => return ControlEffect::Exit,
        }
        ControlEffect::SettingsChanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeybindingsConfig;

    fn controller(width: u32) -> InputModeController {
        let action_map = KeybindingsConfig::default().build_action_map().unwrap();
        InputModeController::new(
            SessionSettings {
                mode: DrawingMode::FreeDraw,
                stroke_width: width,
            },
            action_map,
        )
    }

    #[test]
    fn shrink_floors_at_one() {
        let mut c = controller(1);
        for _ in 0..5 {
            c.shrink();
        }
        assert_eq!(c.stroke_width(), 1);
    }

    #[test]
    fn grow_and_shrink_step_by_one() {
        let mut c = controller(3);
        c.grow();
        c.grow();
        assert_eq!(c.stroke_width(), 5);
        c.shrink();
        assert_eq!(c.stroke_width(), 4);
    }

    #[test]
    fn zero_initial_width_is_raised_to_one() {
        assert_eq!(controller(0).stroke_width(), 1);
    }

    #[test]
    fn default_keys_map_to_actions() {
        let c = controller(1);
        let none = Modifiers::new();
        assert_eq!(c.action_for(Key::Char('d'), none), Some(Action::FreeDrawMode));
        assert_eq!(c.action_for(Key::Char('l'), none), Some(Action::PolylineMode));
        assert_eq!(c.action_for(Key::Char('p'), none), Some(Action::DotMode));
        assert_eq!(c.action_for(Key::Char('h'), none), Some(Action::IncreaseWidth));
        assert_eq!(c.action_for(Key::Char('t'), none), Some(Action::DecreaseWidth));
        assert_eq!(c.action_for(Key::Space, none), Some(Action::ClearCanvas));
        assert_eq!(c.action_for(Key::Escape, none), Some(Action::Exit));
        assert_eq!(c.action_for(Key::Char('x'), none), None);
        assert_eq!(c.action_for(Key::Shift, none), None);
    }

    #[test]
    fn modifier_bindings_need_the_modifier() {
        let c = controller(1);
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::new()
        };
        assert_eq!(c.action_for(Key::Char('q'), ctrl), Some(Action::Exit));
        assert_eq!(c.action_for(Key::Char('q'), Modifiers::new()), None);
        assert_eq!(c.action_for(Key::Char('d'), ctrl), None);
    }

    #[test]
    fn apply_reports_effects() {
        let mut c = controller(2);
        assert_eq!(c.apply(Action::DotMode), ControlEffect::SettingsChanged);
        assert_eq!(c.mode(), DrawingMode::DotOnly);
        assert_eq!(c.apply(Action::PolylineMode), ControlEffect::SettingsChanged);
        assert_eq!(c.mode(), DrawingMode::PolylineOnly);
        assert_eq!(c.apply(Action::ClearCanvas), ControlEffect::ClearCanvas);
        assert_eq!(c.apply(Action::Exit), ControlEffect::Exit);
        assert_eq!(c.stroke_width(), 2);
    }
}
