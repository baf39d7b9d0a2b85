// Wayland backend: a fullscreen layer surface that paints touch strokes.
mod backend;
mod handlers;
mod state;
mod surface;

pub use backend::WaylandBackend;
