//! Per-contact ink strokes and the touch-phase state machine that owns them.
//!
//! Each contact moves through `absent -> active -> (active, extended)* -> finished`.
//! Strokes live in `active` while the finger is down and are moved, never
//! copied, into `finished` when it lifts.

use log::{debug, warn};

use crate::input::DrawingMode;
use crate::touch::{ContactId, TouchEvent, TouchPhase, TouchPoint};

/// One continuous ink path belonging to one contact.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    contact_id: ContactId,
    /// Append-only, in arrival order.
    points: Vec<TouchPoint>,
    /// How many leading points are already on the surface.
    rendered_count: usize,
}

impl Stroke {
    /// Starts a stroke with its first point.
    pub fn new(contact_id: ContactId, first: TouchPoint) -> Self {
        Self {
            contact_id,
            points: vec![first],
            rendered_count: 0,
        }
    }

    pub fn contact_id(&self) -> ContactId {
        self.contact_id
    }

    pub fn points(&self) -> &[TouchPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: TouchPoint) {
        self.points.push(point);
    }

    pub fn rendered_count(&self) -> usize {
        self.rendered_count
    }

    /// Points not yet drawn since the last incremental pass.
    pub fn has_undrawn_points(&self) -> bool {
        self.rendered_count < self.points.len()
    }

    pub(crate) fn set_rendered_count(&mut self, count: usize) {
        self.rendered_count = count.min(self.points.len());
    }
}

/// What applying a touch event did to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A new stroke started.
    Began {
        /// `finished` was wiped because a fresh gesture started outside free-draw.
        cleared_finished: bool,
        /// The id was still active (its `Ended` was lost); that stroke was finalized first.
        replaced_stale: bool,
    },
    /// A point was appended to an active stroke.
    Extended,
    /// An active stroke moved to `finished`.
    Finished,
    /// No stroke matched; nothing changed.
    Ignored,
}

impl Transition {
    /// Whether the whole surface must be wiped before the next draw.
    pub fn clears_surface(&self) -> bool {
        matches!(
            self,
            Transition::Began {
                cleared_finished: true,
                ..
            }
        )
    }
}

/// Owns every stroke: those still being drawn and those already lifted.
///
/// `active` holds at most one stroke per contact id, kept in begin order.
#[derive(Debug, Default)]
pub struct StrokeRegistry {
    active: Vec<Stroke>,
    finished: Vec<Stroke>,
}

impl StrokeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one touch event according to the contact state machine.
    pub fn apply(&mut self, event: &TouchEvent, mode: DrawingMode) -> Transition {
        let id = event.contact_id;
        match event.phase {
            TouchPhase::Began => {
                let replaced_stale = match self.position_of(id) {
                    Some(index) => {
                        warn!(
                            "Contact {} began while still active; finalizing its previous stroke",
                            id
                        );
                        let stale = self.active.remove(index);
                        self.finished.push(stale);
                        true
                    }
                    None => false,
                };

                let cleared_finished = self.active.is_empty() && mode != DrawingMode::FreeDraw;
                if cleared_finished {
                    debug!(
                        "New gesture in {:?} mode; discarding {} finished strokes",
                        mode,
                        self.finished.len()
                    );
                    self.finished.clear();
                }

                self.active.push(Stroke::new(id, event.position));
                debug!("Contact {} began ({} active)", id, self.active.len());
                Transition::Began {
                    cleared_finished,
                    replaced_stale,
                }
            }
            TouchPhase::Moved => match self.active.iter_mut().find(|s| s.contact_id == id) {
                Some(stroke) => {
                    stroke.push(event.position);
                    Transition::Extended
                }
                None => {
                    debug!("Ignoring move for unknown contact {}", id);
                    Transition::Ignored
                }
            },
            TouchPhase::Ended => match self.position_of(id) {
                Some(index) => {
                    let stroke = self.active.remove(index);
                    debug!("Contact {} ended with {} points", id, stroke.len());
                    self.finished.push(stroke);
                    Transition::Finished
                }
                None => {
                    debug!("Ignoring end for unknown contact {}", id);
                    Transition::Ignored
                }
            },
        }
    }

    /// Drops every stroke, active and finished.
    pub fn clear(&mut self) {
        self.active.clear();
        self.finished.clear();
    }

    /// True while no contact is touching the surface.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    pub fn active(&self) -> &[Stroke] {
        &self.active
    }

    pub fn finished(&self) -> &[Stroke] {
        &self.finished
    }

    pub fn active_mut(&mut self) -> &mut [Stroke] {
        &mut self.active
    }

    pub fn finished_mut(&mut self) -> &mut [Stroke] {
        &mut self.finished
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn finished_len(&self) -> usize {
        self.finished.len()
    }

    /// The active stroke for `id`, if that contact is down.
    pub fn active_stroke(&self, id: ContactId) -> Option<&Stroke> {
        self.active.iter().find(|s| s.contact_id == id)
    }

    fn position_of(&self, id: ContactId) -> Option<usize> {
        self.active.iter().position(|s| s.contact_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> TouchPoint {
        TouchPoint::new(x, y)
    }

    #[test]
    fn full_contact_lifecycle_preserves_point_order() {
        let mut registry = StrokeRegistry::new();
        let mode = DrawingMode::FreeDraw;

        assert!(matches!(
            registry.apply(&TouchEvent::began(3, 0.1, 0.2), mode),
            Transition::Began { .. }
        ));
        assert_eq!(registry.apply(&TouchEvent::moved(3, 0.2, 0.2), mode), Transition::Extended);
        assert_eq!(registry.apply(&TouchEvent::moved(3, 0.3, 0.4), mode), Transition::Extended);
        assert_eq!(registry.apply(&TouchEvent::ended(3, 0.9, 0.9), mode), Transition::Finished);

        assert!(registry.active().is_empty());
        assert!(registry.active_stroke(3).is_none());
        assert_eq!(registry.finished_len(), 1);
        assert_eq!(
            registry.finished()[0].points(),
            &[point(0.1, 0.2), point(0.2, 0.2), point(0.3, 0.4)]
        );
    }

    #[test]
    fn orphan_moves_and_ends_are_no_ops() {
        let mut registry = StrokeRegistry::new();
        let mode = DrawingMode::FreeDraw;
        registry.apply(&TouchEvent::began(1, 0.5, 0.5), mode);
        registry.apply(&TouchEvent::ended(1, 0.5, 0.5), mode);
        registry.apply(&TouchEvent::began(2, 0.1, 0.1), mode);

        let active_before = registry.active().to_vec();
        let finished_before = registry.finished().to_vec();

        assert_eq!(registry.apply(&TouchEvent::moved(9, 0.3, 0.3), mode), Transition::Ignored);
        assert_eq!(registry.apply(&TouchEvent::ended(9, 0.3, 0.3), mode), Transition::Ignored);
        assert_eq!(registry.apply(&TouchEvent::moved(1, 0.3, 0.3), mode), Transition::Ignored);

        assert_eq!(registry.active(), active_before.as_slice());
        assert_eq!(registry.finished(), finished_before.as_slice());
    }

    #[test]
    fn polyline_mode_discards_finished_on_next_gesture() {
        let mut registry = StrokeRegistry::new();
        let mode = DrawingMode::PolylineOnly;
        registry.apply(&TouchEvent::began(1, 0.1, 0.1), mode);
        registry.apply(&TouchEvent::ended(1, 0.1, 0.1), mode);
        assert_eq!(registry.finished_len(), 1);

        let transition = registry.apply(&TouchEvent::began(2, 0.4, 0.4), mode);
        assert!(transition.clears_surface());
        assert_eq!(registry.finished_len(), 0);
        assert_eq!(registry.active_len(), 1);
    }

    #[test]
    fn free_draw_keeps_finished_strokes() {
        let mut registry = StrokeRegistry::new();
        let mode = DrawingMode::FreeDraw;
        registry.apply(&TouchEvent::began(1, 0.1, 0.1), mode);
        registry.apply(&TouchEvent::ended(1, 0.1, 0.1), mode);

        let transition = registry.apply(&TouchEvent::began(2, 0.4, 0.4), mode);
        assert!(!transition.clears_surface());
        assert_eq!(registry.finished_len(), 1);
        assert_eq!(registry.finished()[0].contact_id(), 1);
    }

    #[test]
    fn second_finger_in_dot_mode_does_not_clear() {
        let mut registry = StrokeRegistry::new();
        let mode = DrawingMode::DotOnly;
        registry.apply(&TouchEvent::began(1, 0.1, 0.1), mode);
        registry.apply(&TouchEvent::began(4, 0.2, 0.1), mode);
        registry.apply(&TouchEvent::ended(4, 0.2, 0.1), mode);

        let transition = registry.apply(&TouchEvent::began(5, 0.3, 0.1), mode);
        assert!(!transition.clears_surface());
        assert_eq!(registry.finished_len(), 1);
        assert_eq!(registry.active_len(), 2);
    }

    #[test]
    fn reused_active_id_finalizes_stale_stroke() {
        let mut registry = StrokeRegistry::new();
        let mode = DrawingMode::FreeDraw;
        registry.apply(&TouchEvent::began(7, 0.1, 0.1), mode);
        registry.apply(&TouchEvent::moved(7, 0.2, 0.1), mode);

        let transition = registry.apply(&TouchEvent::began(7, 0.8, 0.8), mode);
        assert_eq!(
            transition,
            Transition::Began {
                cleared_finished: false,
                replaced_stale: true
            }
        );
        assert_eq!(registry.active_len(), 1);
        assert_eq!(registry.active_stroke(7).unwrap().points(), &[point(0.8, 0.8)]);
        assert_eq!(registry.finished_len(), 1);
        assert_eq!(registry.finished()[0].len(), 2);
    }

    #[test]
    fn each_stroke_lives_in_exactly_one_set() {
        let mut registry = StrokeRegistry::new();
        let mode = DrawingMode::FreeDraw;
        for id in 0..4 {
            registry.apply(&TouchEvent::began(id, 0.1, 0.1), mode);
        }
        registry.apply(&TouchEvent::ended(1, 0.1, 0.1), mode);
        registry.apply(&TouchEvent::ended(3, 0.1, 0.1), mode);
        // id 1 is free again once its end was processed
        registry.apply(&TouchEvent::began(1, 0.5, 0.5), mode);

        let active_ids: Vec<_> = registry.active().iter().map(Stroke::contact_id).collect();
        assert_eq!(active_ids, vec![0, 2, 1]);
        let finished_ids: Vec<_> = registry.finished().iter().map(Stroke::contact_id).collect();
        assert_eq!(finished_ids, vec![1, 3]);

        assert_eq!(registry.active_stroke(1).unwrap().points(), &[point(0.5, 0.5)]);
        assert_eq!(registry.finished()[0].points(), &[point(0.1, 0.1)]);
    }

    #[test]
    fn clear_drops_everything_and_reports_idle() {
        let mut registry = StrokeRegistry::new();
        registry.apply(&TouchEvent::began(1, 0.1, 0.1), DrawingMode::FreeDraw);
        registry.apply(&TouchEvent::began(2, 0.1, 0.1), DrawingMode::FreeDraw);
        registry.apply(&TouchEvent::ended(2, 0.1, 0.1), DrawingMode::FreeDraw);
        assert!(!registry.is_idle());

        registry.clear();
        assert!(registry.is_idle());
        assert_eq!(registry.finished_len(), 0);
    }

    #[test]
    fn rendered_count_never_exceeds_points() {
        let mut stroke = Stroke::new(1, point(0.0, 0.0));
        stroke.set_rendered_count(10);
        assert_eq!(stroke.rendered_count(), 1);
        assert!(!stroke.has_undrawn_points());
        stroke.push(point(0.1, 0.1));
        assert!(stroke.has_undrawn_points());
    }
}
