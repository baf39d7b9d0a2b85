//! Keyboard handling, session settings and the event dispatcher.
//!
//! This module translates backend keyboard, touch and expose events into
//! stroke and settings changes. It owns the mode controller (drawing mode,
//! stroke width) and the [`InputState`] every backend drives.

pub mod controller;
pub mod events;
pub mod mode;
pub mod modifiers;
pub mod state;

// Re-export commonly used types at module level
pub use controller::{ControlEffect, InputModeController, SessionSettings};
pub use events::Key;
pub use mode::DrawingMode;
pub use modifiers::Modifiers;
pub use state::{InputState, RedrawKind};
