//! Rendering layer - one logical draw call, many identical targets.
//!
//! Game code never talks to a panel or a window directly. It issues cell and
//! rectangle fills against a [`Compositor`], which converts grid cells to
//! pixel rectangles and forwards each operation to every registered
//! [`DisplaySink`] with identical arguments.
//!
//! # Module Structure
//!
//! - [`color`]: RGB565 wire colors and their lossless RGB888 expansion
//! - [`sink`]: the `DisplaySink` capability implemented once per target
//! - [`compositor`]: fan-out, cell geometry and degraded-mode bookkeeping
//! - [`surface`]: in-memory pixel surface and a headless sink built on it
//! - [`text`]: 5x7 glyph table and centered text
//!
//! # Example
//!
//! ```
//! use pi_snake_render::{Compositor, DisplaySink, Layout, MemorySink, Rgb565};
//!
//! let mut gfx = Compositor::new(Layout::new(240, 240, 10));
//! gfx.register(Box::new(MemorySink::new("a", 240, 240)));
//! gfx.register(Box::new(MemorySink::new("b", 240, 240)));
//!
//! gfx.draw_cell(2, 3, Rgb565::GREEN);
//!
//! for sink in gfx.sinks() {
//!     assert_eq!(sink.read_pixel(25, 35), Some(Rgb565::GREEN.to_rgb()));
//! }
//! ```

pub mod color;
pub mod compositor;
pub mod sink;
pub mod surface;
pub mod text;

pub use pi_snake_types as types;

pub use color::{Rgb, Rgb565};
pub use compositor::{Compositor, DegradedSink, Layout};
pub use sink::{DisplaySink, PresentStatus, SinkError};
pub use surface::{MemorySink, PixelSurface};
pub use text::{draw_text_centered, text_width};
