//! Compositor multi-touch (`wl_touch`) adapter.
//!
//! Samples arrive on the main thread in surface-local pixels. They are
//! normalized against the surface size in effect when the sample is
//! translated, since the surface may be resized between two samples of the
//! same contact.

use log::debug;
use std::collections::HashMap;

use super::{ContactId, TouchAdapter, TouchEvent, TouchPhase, TouchPoint};

/// Current pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Event type reported by the compositor for a touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeTouchKind {
    Begin,
    Update,
    End,
}

/// One raw `wl_touch` sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeTouch {
    pub id: i32,
    pub kind: NativeTouchKind,
    /// Surface-local pixels; `wl_touch.up` carries none.
    pub position: Option<(f64, f64)>,
    /// Surface size read at the moment the sample was delivered.
    pub surface: SurfaceSize,
}

/// Translates `wl_touch` samples, remembering the last position of each
/// contact so that `up` (which has no coordinates) can be placed.
#[derive(Debug, Default)]
pub struct NativeAdapter {
    last_positions: HashMap<i32, (f64, f64)>,
}

impl NativeAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contacts currently down as far as the compositor told us.
    pub fn tracked_contacts(&self) -> usize {
        self.last_positions.len()
    }

    /// Ends every remembered contact, for `wl_touch.cancel`.
    pub fn cancel_all(&mut self, surface: SurfaceSize) -> Vec<TouchEvent> {
        let mut ids: Vec<i32> = self.last_positions.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter()
            .filter_map(|id| {
                self.translate(NativeTouch {
                    id,
                    kind: NativeTouchKind::End,
                    position: None,
                    surface,
                })
            })
            .collect()
    }
}

impl TouchAdapter for NativeAdapter {
    type Raw = NativeTouch;

    fn translate(&mut self, raw: NativeTouch) -> Option<TouchEvent> {
        let phase = match raw.kind {
            NativeTouchKind::Begin => TouchPhase::Began,
            NativeTouchKind::Update => TouchPhase::Moved,
            NativeTouchKind::End => TouchPhase::Ended,
        };

        let Ok(contact_id) = ContactId::try_from(raw.id) else {
            debug!("Dropping touch sample with negative id {}", raw.id);
            return None;
        };

        let pixels = match (raw.kind, raw.position) {
            (NativeTouchKind::End, _) => self.last_positions.remove(&raw.id).or(raw.position),
            (_, Some(position)) => {
                self.last_positions.insert(raw.id, position);
                Some(position)
            }
            (_, None) => None,
        };

        if raw.surface.is_empty() {
            debug!("Dropping touch sample for contact {}: surface not sized yet", contact_id);
            return None;
        }

        let (px, py) = pixels.unwrap_or((0.0, 0.0));
        let position = TouchPoint::new(
            px / f64::from(raw.surface.width),
            py / f64::from(raw.surface.height),
        )
        .clamped();

        Some(TouchEvent::new(contact_id, phase, position))
    }
}
