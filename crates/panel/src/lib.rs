//! Raspberry Pi hardware: the ST7789 panel and the GPIO buttons.
//!
//! Both are written against `embedded-hal` traits. [`St7789`] adapts any
//! `embedded-graphics` draw target to a [`DisplaySink`](render::DisplaySink)
//! and [`GpioButtons`] reads any set of input pins, so both run in tests
//! against mocks. The [`linux`] module supplies the real spidev and GPIO
//! character device implementations and brings the controller up through
//! `mipidsi`.

use std::path::Path;

pub mod buttons;
pub mod linux;
pub mod st7789;

pub use pi_snake_input as input;
pub use pi_snake_render as render;
pub use pi_snake_types as types;

pub use buttons::{ButtonPins, GpioButtons};
pub use linux::{open_buttons, PanelDisplay, PanelPins, DEFAULT_SPI_HZ};
pub use st7789::St7789;

use linux_embedded_hal::CdevPin;
use render::SinkError;

/// The panel sink as the binary runs it
pub type Panel = St7789<PanelDisplay, CdevPin>;

/// Open the bus and initialize the panel with the backlight on.
pub fn open_panel(
    spi_device: &Path,
    gpio_chip: &Path,
    pins: PanelPins,
    spi_hz: u32,
    width: u16,
    height: u16,
) -> Result<Panel, SinkError> {
    let (display, backlight) =
        linux::open_display(spi_device, gpio_chip, pins, spi_hz, width, height)
            .map_err(|e| SinkError::Unavailable(format!("{:#}", e)))?;
    let mut panel = St7789::new(display, backlight, width, height);
    panel.set_backlight(true)?;
    Ok(panel)
}
