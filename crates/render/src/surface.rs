//! Pixel surface: an in-memory RGB888 image of the panel.
//!
//! Buffered sinks (the terminal mirror, tests) draw here and read it back
//! when presenting. Writes are clipped to the surface.

use crate::color::{Rgb, Rgb565};
use crate::sink::{DisplaySink, SinkError};

/// 2D row-major pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: u16,
    height: u16,
    pixels: Vec<Rgb>,
    /// Bumped on every write, lets presenters skip unchanged frames.
    generation: u64,
}

impl PixelSurface {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![Rgb::default(); len],
            generation: 0,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Rgb> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn clear(&mut self, color: Rgb565) {
        self.pixels.fill(color.to_rgb());
        self.generation = self.generation.wrapping_add(1);
    }

    /// Fill a rectangle, clipped to the surface. A rectangle whose origin
    /// lies outside is ignored.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) {
        if x >= self.width || y >= self.height || w == 0 || h == 0 {
            return;
        }
        let x_end = x.saturating_add(w).min(self.width) as usize;
        let y_end = y.saturating_add(h).min(self.height) as usize;
        let rgb = color.to_rgb();
        let stride = self.width as usize;
        for row in y as usize..y_end {
            let start = row * stride;
            self.pixels[start + x as usize..start + x_end].fill(rgb);
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// True if every pixel of the rectangle has `color` (clipped area only).
    pub fn rect_is(&self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> bool {
        let rgb = color.to_rgb();
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        (y..y_end).all(|py| (x..x_end).all(|px| self.get(px, py) == Some(rgb)))
    }
}

/// A sink that only keeps a [`PixelSurface`]. Used headless and in tests.
#[derive(Debug, Clone)]
pub struct MemorySink {
    name: String,
    surface: PixelSurface,
}

impl MemorySink {
    pub fn new(name: impl Into<String>, width: u16, height: u16) -> Self {
        Self {
            name: name.into(),
            surface: PixelSurface::new(width, height),
        }
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }
}

impl DisplaySink for MemorySink {
    fn name(&self) -> &str {
        &self.name
    }

    fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: Rgb565,
    ) -> Result<(), SinkError> {
        self.surface.fill_rect(x, y, w, h, color);
        Ok(())
    }

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), SinkError> {
        self.surface.clear(color);
        Ok(())
    }

    fn read_pixel(&self, x: u16, y: u16) -> Option<Rgb> {
        self.surface.get(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_black() {
        let s = PixelSurface::new(4, 3);
        assert_eq!(s.pixels().len(), 12);
        assert!(s.rect_is(0, 0, 4, 3, Rgb565::BLACK));
    }

    #[test]
    fn test_fill_rect_clips_to_edges() {
        let mut s = PixelSurface::new(10, 10);
        s.fill_rect(8, 8, 5, 5, Rgb565::RED);
        assert!(s.rect_is(8, 8, 2, 2, Rgb565::RED));
        assert_eq!(s.get(7, 7), Some(Rgb::new(0, 0, 0)));
        assert_eq!(s.get(10, 10), None);
    }

    #[test]
    fn test_fill_rect_outside_is_ignored() {
        let mut s = PixelSurface::new(10, 10);
        let before = s.generation();
        s.fill_rect(10, 0, 3, 3, Rgb565::RED);
        s.fill_rect(0, 0, 0, 3, Rgb565::RED);
        assert_eq!(s.generation(), before);
        assert!(s.rect_is(0, 0, 10, 10, Rgb565::BLACK));
    }

    #[test]
    fn test_clear_fills_everything() {
        let mut s = PixelSurface::new(3, 3);
        s.clear(Rgb565::BLUE);
        assert!(s.rect_is(0, 0, 3, 3, Rgb565::BLUE));
        assert_eq!(s.generation(), 1);
    }

    #[test]
    fn test_memory_sink_reads_back() {
        let mut sink = MemorySink::new("mem", 20, 20);
        sink.fill_rect(10, 10, 10, 10, Rgb565::GREEN).unwrap();
        assert_eq!(sink.read_pixel(15, 15), Some(Rgb565::GREEN.to_rgb()));
        assert_eq!(sink.read_pixel(5, 5), Some(Rgb565::BLACK.to_rgb()));
        assert_eq!(sink.name(), "mem");
    }
}
