//! Terminal mirror module.
//!
//! A virtual display sink that shows the panel image in a terminal. It keeps
//! a full-resolution pixel surface and flushes it through a small
//! framebuffer renderer (no widget toolkit), diffing frames so only changed
//! character runs are written.

pub mod fb;
pub mod mirror;
pub mod renderer;

pub use pi_snake_render as render;
pub use pi_snake_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use mirror::{TerminalMirror, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
