use log::debug;

use crate::draw::DrawSurface;

use super::InputState;

/// Which kind of draw [`InputState::render`] performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawKind {
    /// Nothing was pending.
    Skipped,
    /// Surface wiped, finished then active strokes replayed.
    Full,
    /// Only the undrawn tails of active strokes.
    Incremental,
}

impl InputState {
    /// Draws whatever is pending onto `surface` and clears the request flags.
    pub fn render<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> RedrawKind {
        if !self.needs_redraw && !self.needs_full_redraw {
            return RedrawKind::Skipped;
        }

        let settings = *self.controller.settings();
        let kind = if self.needs_full_redraw {
            self.renderer
                .repaint_all(&mut self.registry, surface, &settings, self.background);
            RedrawKind::Full
        } else {
            self.renderer
                .draw_active(&mut self.registry, surface, &settings);
            RedrawKind::Incremental
        };

        debug!(
            "{:?} redraw: {} active, {} finished",
            kind,
            self.registry.active_len(),
            self.registry.finished_len()
        );
        self.needs_full_redraw = false;
        self.needs_redraw = false;
        kind
    }
}
