use log::debug;

use crate::draw::Transition;
use crate::touch::TouchEvent;

use super::InputState;

impl InputState {
    /// Applies one canonical touch event.
    ///
    /// Never draws inline: it only flags a redraw so that bursts of samples
    /// are coalesced into one draw per loop iteration.
    pub fn on_touch(&mut self, event: TouchEvent) -> Transition {
        let transition = self.registry.apply(&event, self.controller.mode());

        if transition.clears_surface() {
            self.needs_full_redraw = true;
        }
        if transition == Transition::Ignored {
            debug!(
                "Touch {:?} for contact {} matched no stroke",
                event.phase, event.contact_id
            );
        }

        self.refresh_idle();
        self.needs_redraw = true;
        transition
    }
}
