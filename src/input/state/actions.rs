use log::{debug, info};

use crate::input::{ControlEffect, events::Key};

use super::InputState;

impl InputState {
    /// Processes a key press event.
    ///
    /// Modifier keys only update modifier state; every other key is looked up
    /// in the keybinding map and handed to the mode controller.
    pub fn on_key_press(&mut self, key: Key) {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return;
            }
            _ => {}
        }

        let Some(action) = self.controller.action_for(key, self.modifiers) else {
            debug!("No action bound to {:?}", key);
            return;
        };

        debug!("Key {:?} -> {:?}", key, action);
        match self.controller.apply(action) {
            ControlEffect::SettingsChanged => {}
            ControlEffect::ClearCanvas => self.clear_canvas(),
            ControlEffect::Exit => {
                info!("Exit requested");
                self.should_exit = true;
            }
        }
    }

    /// Processes a key release event.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }

    /// Drops all strokes and asks for a blank repaint.
    pub fn clear_canvas(&mut self) {
        debug!(
            "Clearing canvas ({} active, {} finished)",
            self.registry.active_len(),
            self.registry.finished_len()
        );
        self.registry.clear();
        self.refresh_idle();
        self.needs_full_redraw = true;
        self.needs_redraw = true;
    }
}
