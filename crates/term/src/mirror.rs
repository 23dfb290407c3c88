//! Terminal mirror: a buffered display sink shown with half-block glyphs.
//!
//! Draw calls land on a full-resolution [`PixelSurface`]. On present the
//! surface is downsampled, two pixel rows per character row (upper half
//! block, foreground = top sample, background = bottom sample), centered in
//! the terminal and diffed against the previous frame.

use std::io::{self, Write};

use log::warn;

use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::render::{DisplaySink, PixelSurface, PresentStatus, Rgb, Rgb565, SinkError};
use crate::renderer::TerminalRenderer;

const UPPER_HALF: char = '\u{2580}';

/// Terminal size provider: the live terminal or a fixed viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    Terminal,
    Fixed { cols: u16, rows: u16 },
}

impl Viewport {
    fn size(self) -> (u16, u16) {
        match self {
            Viewport::Terminal => crossterm::terminal::size().unwrap_or((80, 24)),
            Viewport::Fixed { cols, rows } => (cols, rows),
        }
    }
}

pub struct TerminalMirror<W: Write = io::Stdout> {
    surface: PixelSurface,
    renderer: TerminalRenderer<W>,
    frame: FrameBuffer,
    scale: u16,
    viewport: Viewport,
    /// Surface generation and terminal size of the last presented frame
    presented: Option<(u64, (u16, u16))>,
}

impl TerminalMirror<io::Stdout> {
    /// Take over stdout: alternate screen, hidden cursor.
    pub fn open(width: u16, height: u16, scale: u16) -> Result<Self, SinkError> {
        let mut renderer = TerminalRenderer::new();
        renderer
            .enter()
            .map_err(|e| SinkError::Unavailable(format!("terminal: {}", e)))?;
        Ok(Self::from_parts(renderer, width, height, scale, Viewport::Terminal))
    }
}

impl<W: Write> TerminalMirror<W> {
    /// A mirror writing to `out` with a fixed character viewport.
    pub fn with_writer(out: W, width: u16, height: u16, scale: u16, cols: u16, rows: u16) -> Self {
        Self::from_parts(
            TerminalRenderer::with_writer(out),
            width,
            height,
            scale,
            Viewport::Fixed { cols, rows },
        )
    }

    fn from_parts(
        renderer: TerminalRenderer<W>,
        width: u16,
        height: u16,
        scale: u16,
        viewport: Viewport,
    ) -> Self {
        Self {
            surface: PixelSurface::new(width, height),
            renderer,
            frame: FrameBuffer::new(0, 0),
            scale: scale.max(1),
            viewport,
            presented: None,
        }
    }

    pub fn scale(&self) -> u16 {
        self.scale
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn writer(&self) -> &W {
        self.renderer.writer()
    }

    /// Character columns and rows the panel image occupies.
    pub fn image_size(&self) -> (u16, u16) {
        let cols = self.surface.width() / self.scale;
        let rows = self.surface.height() / self.scale / 2;
        (cols, rows)
    }

    fn sample(&self, col: u16, pixel_row: u16) -> Rgb {
        let half = self.scale / 2;
        let x = col * self.scale + half;
        let y = pixel_row * self.scale + half;
        self.surface.get(x, y).unwrap_or_default()
    }

    /// Rebuild the character frame for a terminal of `cols` x `rows`.
    fn compose(&mut self, cols: u16, rows: u16) {
        self.frame.resize(cols, rows);
        self.frame.clear(Cell::default());

        let (img_cols, img_rows) = self.image_size();
        let ox = cols.saturating_sub(img_cols) / 2;
        let oy = rows.saturating_sub(img_rows) / 2;
        for row in 0..img_rows.min(rows) {
            for col in 0..img_cols.min(cols) {
                let style = CellStyle {
                    fg: self.sample(col, row * 2),
                    bg: self.sample(col, row * 2 + 1),
                };
                self.frame.set(
                    ox + col,
                    oy + row,
                    Cell {
                        ch: UPPER_HALF,
                        style,
                    },
                );
            }
        }
    }

    fn restore(&mut self) {
        if let Err(e) = self.renderer.exit() {
            warn!("failed to restore terminal: {}", e);
        }
    }
}

impl<W: Write> DisplaySink for TerminalMirror<W> {
    fn name(&self) -> &str {
        "terminal"
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> Result<(), SinkError> {
        self.surface.fill_rect(x, y, w, h, color);
        Ok(())
    }

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), SinkError> {
        self.surface.clear(color);
        Ok(())
    }

    fn present(&mut self) -> Result<PresentStatus, SinkError> {
        let size = self.viewport.size();
        let key = (self.surface.generation(), size);
        if self.presented == Some(key) {
            return Ok(PresentStatus::Continue);
        }
        self.compose(size.0, size.1);
        self.renderer
            .draw_swap(&mut self.frame)
            .map_err(|e| SinkError::Io(io::Error::new(io::ErrorKind::Other, e.to_string())))?;
        self.presented = Some(key);
        Ok(PresentStatus::Continue)
    }

    fn read_pixel(&self, x: u16, y: u16) -> Option<Rgb> {
        self.surface.get(x, y)
    }
}

impl<W: Write> Drop for TerminalMirror<W> {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_size_by_scale() {
        let m = TerminalMirror::with_writer(Vec::new(), 240, 240, 4, 80, 40);
        assert_eq!(m.image_size(), (60, 30));
        let m = TerminalMirror::with_writer(Vec::new(), 240, 240, 8, 80, 40);
        assert_eq!(m.image_size(), (30, 15));
    }

    #[test]
    fn test_zero_scale_is_clamped() {
        let m = TerminalMirror::with_writer(Vec::new(), 240, 240, 0, 80, 40);
        assert_eq!(m.scale(), 1);
    }

    #[test]
    fn test_compose_centers_and_splits_halves() {
        let mut m = TerminalMirror::with_writer(Vec::new(), 240, 240, 4, 80, 40);
        // Top 4 pixel rows red, next 4 green: first character row is red over green.
        m.fill_rect(0, 0, 240, 4, Rgb565::RED).unwrap();
        m.fill_rect(0, 4, 240, 4, Rgb565::GREEN).unwrap();
        m.compose(80, 40);

        // 60x30 image in 80x40: offset (10, 5)
        let cell = m.frame.get(10, 5).unwrap();
        assert_eq!(cell.ch, UPPER_HALF);
        assert_eq!(cell.style.fg, Rgb565::RED.to_rgb());
        assert_eq!(cell.style.bg, Rgb565::GREEN.to_rgb());
        assert_eq!(m.frame.get(9, 5).unwrap().ch, ' ');
        assert_eq!(m.frame.get(10, 4).unwrap().ch, ' ');
    }

    #[test]
    fn test_unchanged_frame_is_not_redrawn() {
        let mut m = TerminalMirror::with_writer(Vec::new(), 20, 20, 2, 20, 10);
        m.fill_screen(Rgb565::BLUE).unwrap();
        m.present().unwrap();
        let written = m.writer().len();
        assert!(written > 0);

        m.present().unwrap();
        assert_eq!(m.writer().len(), written);

        m.fill_rect(0, 0, 2, 2, Rgb565::YELLOW).unwrap();
        m.present().unwrap();
        assert!(m.writer().len() > written);
    }

    #[test]
    fn test_small_terminal_crops() {
        let mut m = TerminalMirror::with_writer(Vec::new(), 240, 240, 4, 20, 10);
        m.fill_screen(Rgb565::WHITE).unwrap();
        m.compose(20, 10);
        assert!(m.frame.cells().iter().all(|c| c.ch == UPPER_HALF));
    }
}
