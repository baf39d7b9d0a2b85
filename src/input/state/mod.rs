mod actions;
mod core;
mod render;
mod touch;
#[cfg(test)]
mod tests;

pub use core::InputState;
pub use render::RedrawKind;
