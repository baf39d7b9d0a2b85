//! Library exports for touchscriber.
//!
//! A fullscreen Wayland surface that paints one colored stroke per finger.
//! Touches come either from the compositor's multi-touch protocol or from a
//! gesture server speaking a line-based text protocol; both are normalized
//! into [`touch::TouchEvent`]s, tracked by [`draw::StrokeRegistry`] and drawn
//! by [`draw::Renderer`].

pub mod backend;
pub mod config;
pub mod draw;
pub mod input;
pub mod touch;

pub use config::Config;
