//! Ink strokes and their rendering (Cairo-based).
//!
//! This module defines the drawing side of the painting surface:
//! - [`Stroke`] and [`StrokeRegistry`]: per-contact ink paths and the touch-phase state machine
//! - [`Renderer`]: full and incremental stroke drawing through a [`DrawSurface`]
//! - [`Color`] and [`Palette`]: ink colors, one per contact id

pub mod color;
pub mod render;
pub mod stroke;

// Re-export commonly used types at module level
pub use color::{BLACK, Color, Palette, TRANSPARENT, WHITE};
pub use render::{CairoSurface, DevicePoint, DrawSurface, Renderer};
pub use stroke::{Stroke, StrokeRegistry, Transition};

#[cfg(test)]
pub(crate) mod testing;
