//! Backend-independent touch samples.

/// Identifier of one continuous contact, stable from finger-down to finger-up.
pub type ContactId = u32;

/// A position in normalized surface coordinates.
///
/// `(0.0, 0.0)` is the top-left corner of the surface and `(1.0, 1.0)` the
/// bottom-right, whatever the pixel resolution happens to be.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchPoint {
    x: f64,
    y: f64,
}

impl TouchPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in `[0, 1]`.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical coordinate in `[0, 1]`.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns the point with both axes pinned into `[0, 1]`.
    ///
    /// NaN collapses to `0.0` so a garbled sample can never poison later
    /// pixel arithmetic.
    pub fn clamped(self) -> Self {
        fn unit(v: f64) -> f64 {
            if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
        }
        Self {
            x: unit(self.x),
            y: unit(self.y),
        }
    }
}

/// Lifecycle phase of a touch sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger went down.
    Began,
    /// Finger moved while down.
    Moved,
    /// Finger lifted.
    Ended,
}

/// One normalized touch sample, produced by a [`TouchAdapter`](super::TouchAdapter).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub contact_id: ContactId,
    pub phase: TouchPhase,
    pub position: TouchPoint,
}

impl TouchEvent {
    pub fn new(contact_id: ContactId, phase: TouchPhase, position: TouchPoint) -> Self {
        Self {
            contact_id,
            phase,
            position,
        }
    }

    pub fn began(contact_id: ContactId, x: f64, y: f64) -> Self {
        Self::new(contact_id, TouchPhase::Began, TouchPoint::new(x, y))
    }

    pub fn moved(contact_id: ContactId, x: f64, y: f64) -> Self {
        Self::new(contact_id, TouchPhase::Moved, TouchPoint::new(x, y))
    }

    pub fn ended(contact_id: ContactId, x: f64, y: f64) -> Self {
        Self::new(contact_id, TouchPhase::Ended, TouchPoint::new(x, y))
    }
}
