//! ST7789 panel as a display sink.
//!
//! The controller itself is driven by `mipidsi`; this adapter clips to the
//! panel, converts colors and owns the backlight line.

use std::fmt;
use std::io;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565 as PanelColor;
use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use embedded_hal::digital::OutputPin;
use log::warn;

use crate::render::{DisplaySink, Rgb565, SinkError};

pub fn panel_color(color: Rgb565) -> PanelColor {
    PanelColor::from(RawU16::new(color.0))
}

fn io_error(e: impl fmt::Debug) -> SinkError {
    SinkError::Io(io::Error::new(io::ErrorKind::Other, format!("{:?}", e)))
}

pub struct St7789<D, BL>
where
    D: DrawTarget<Color = PanelColor>,
    BL: OutputPin,
{
    display: D,
    backlight: BL,
    width: u16,
    height: u16,
    lit: bool,
}

impl<D, BL> St7789<D, BL>
where
    D: DrawTarget<Color = PanelColor>,
    D::Error: fmt::Debug,
    BL: OutputPin,
{
    /// Wrap an initialized display. The backlight is left as it is.
    pub fn new(display: D, backlight: BL, width: u16, height: u16) -> Self {
        Self {
            display,
            backlight,
            width,
            height,
            lit: false,
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<(), SinkError> {
        if on {
            self.backlight.set_high().map_err(io_error)?;
        } else {
            self.backlight.set_low().map_err(io_error)?;
        }
        self.lit = on;
        Ok(())
    }

    /// Clipped panel rectangle, or `None` when nothing is left to draw.
    fn clip(&self, x: u16, y: u16, w: u16, h: u16) -> Option<Rectangle> {
        if x >= self.width || y >= self.height || w == 0 || h == 0 {
            return None;
        }
        let w = w.min(self.width - x);
        let h = h.min(self.height - y);
        Some(Rectangle::new(
            Point::new(x as i32, y as i32),
            Size::new(w as u32, h as u32),
        ))
    }
}

impl<D, BL> DisplaySink for St7789<D, BL>
where
    D: DrawTarget<Color = PanelColor>,
    D::Error: fmt::Debug,
    BL: OutputPin,
{
    fn name(&self) -> &str {
        "st7789"
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> Result<(), SinkError> {
        let Some(area) = self.clip(x, y, w, h) else {
            return Ok(());
        };
        self.display
            .fill_solid(&area, panel_color(color))
            .map_err(io_error)
    }

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), SinkError> {
        let (w, h) = (self.width, self.height);
        self.fill_rect(0, 0, w, h, color)
    }
}

impl<D, BL> Drop for St7789<D, BL>
where
    D: DrawTarget<Color = PanelColor>,
    BL: OutputPin,
{
    fn drop(&mut self) {
        if self.lit {
            if let Err(e) = self.backlight.set_low() {
                warn!("failed to switch backlight off: {:?}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::prelude::{OriginDimensions, Pixel, RgbColor};
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    fn mock_display() -> MockDisplay<PanelColor> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display
    }

    struct DeadDisplay;

    impl OriginDimensions for DeadDisplay {
        fn size(&self) -> Size {
            Size::new(64, 64)
        }
    }

    impl DrawTarget for DeadDisplay {
        type Color = PanelColor;
        type Error = &'static str;

        fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            Err("spi gone")
        }
    }

    #[test]
    fn test_color_conversion_keeps_bits() {
        assert_eq!(panel_color(Rgb565::RED), PanelColor::RED);
        assert_eq!(panel_color(Rgb565::GREEN), PanelColor::GREEN);
        assert_eq!(panel_color(Rgb565::BLUE), PanelColor::BLUE);
        assert_eq!(panel_color(Rgb565::YELLOW), PanelColor::YELLOW);
        assert_eq!(panel_color(Rgb565::WHITE), PanelColor::WHITE);
    }

    #[test]
    fn test_fill_rect_reaches_display() {
        let mut bl = PinMock::new(&[]);
        let mut panel = St7789::new(mock_display(), bl.clone(), 64, 64);
        panel.fill_rect(10, 20, 10, 10, Rgb565::RED).unwrap();

        let display = panel.display();
        assert_eq!(display.get_pixel(Point::new(10, 20)), Some(PanelColor::RED));
        assert_eq!(display.get_pixel(Point::new(19, 29)), Some(PanelColor::RED));
        assert_eq!(display.get_pixel(Point::new(20, 20)), None);
        assert_eq!(display.get_pixel(Point::new(9, 20)), None);
        drop(panel);
        bl.done();
    }

    #[test]
    fn test_fill_rect_clips_and_ignores_outside() {
        let mut bl = PinMock::new(&[]);
        let mut panel = St7789::new(mock_display(), bl.clone(), 64, 64);
        panel.fill_rect(60, 60, 10, 10, Rgb565::BLUE).unwrap();
        panel.fill_rect(64, 0, 10, 10, Rgb565::RED).unwrap();
        panel.fill_rect(0, 0, 0, 10, Rgb565::RED).unwrap();

        let display = panel.display();
        assert_eq!(display.get_pixel(Point::new(63, 63)), Some(PanelColor::BLUE));
        assert_eq!(display.get_pixel(Point::new(60, 60)), Some(PanelColor::BLUE));
        assert_eq!(display.get_pixel(Point::new(0, 0)), None);
        drop(panel);
        bl.done();
    }

    #[test]
    fn test_fill_screen_covers_panel() {
        let mut bl = PinMock::new(&[]);
        let mut panel = St7789::new(mock_display(), bl.clone(), 64, 64);
        panel.fill_screen(Rgb565::GREEN).unwrap();

        let display = panel.display();
        assert_eq!(display.get_pixel(Point::new(0, 0)), Some(PanelColor::GREEN));
        assert_eq!(display.get_pixel(Point::new(63, 63)), Some(PanelColor::GREEN));
        drop(panel);
        bl.done();
    }

    #[test]
    fn test_backlight_on_then_off_at_drop() {
        let mut bl = PinMock::new(&[
            Transaction::set(State::High),
            Transaction::set(State::Low),
        ]);
        {
            let mut panel = St7789::new(mock_display(), bl.clone(), 64, 64);
            panel.set_backlight(true).unwrap();
        }
        bl.done();
    }

    #[test]
    fn test_unlit_panel_leaves_backlight_alone() {
        let mut bl = PinMock::new(&[]);
        drop(St7789::new(mock_display(), bl.clone(), 64, 64));
        bl.done();
    }

    #[test]
    fn test_display_failure_surfaces_as_io_error() {
        let mut bl = PinMock::new(&[]);
        let mut panel = St7789::new(DeadDisplay, bl.clone(), 64, 64);
        let err = panel.fill_rect(0, 0, 10, 10, Rgb565::RED).unwrap_err();
        match err {
            SinkError::Io(io) => assert!(io.to_string().contains("spi gone")),
            other => panic!("unexpected error {:?}", other),
        }
        drop(panel);
        bl.done();
    }
}
