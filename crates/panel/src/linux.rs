//! Linux transport: spidev for the panel, the GPIO character device for the
//! control and button lines.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use embedded_hal::digital::OutputPin;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{CdevPin, Delay, SpidevDevice};
use log::info;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7789;
use mipidsi::Builder;
use static_cell::StaticCell;

use crate::buttons::{ButtonPins, GpioButtons};
use crate::types::Button;

/// Largest single spidev transfer with the default `bufsiz`
pub const SPI_CHUNK: usize = 4096;

/// 250 MHz core clock divided by 8
pub const DEFAULT_SPI_HZ: u32 = 31_250_000;

const CONSUMER: &str = "pi-snake";

/// The controller behind the sink: mipidsi over spidev, with D/C and reset
/// on GPIO lines.
pub type PanelDisplay =
    mipidsi::Display<SpiInterface<'static, SpidevDevice, CdevPin>, ST7789, CdevPin>;

/// BCM line offsets of the panel control lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelPins {
    pub dc: u8,
    pub reset: u8,
    pub backlight: u8,
}

impl Default for PanelPins {
    fn default() -> Self {
        Self {
            dc: 25,
            reset: 24,
            backlight: 26,
        }
    }
}

/// SPI mode 0, 8-bit words, at `hz`.
pub fn spi_options(hz: u32) -> SpidevOptions {
    SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(hz)
        .mode(SpiModeFlags::SPI_MODE_0)
        .build()
}

pub fn open_spi(path: &Path, hz: u32) -> Result<SpidevDevice> {
    let mut spi = SpidevDevice::open(path)
        .map_err(|e| anyhow!("opening {}: {:?}", path.display(), e))?;
    spi.configure(&spi_options(hz))
        .with_context(|| format!("configuring {} at {} Hz", path.display(), hz))?;
    Ok(spi)
}

fn open_chip(path: &Path) -> Result<Chip> {
    Chip::new(path).with_context(|| format!("opening {}", path.display()))
}

fn request_line(chip: &mut Chip, offset: u8, flags: LineRequestFlags, level: u8) -> Result<CdevPin> {
    let handle = chip
        .get_line(offset as u32)
        .and_then(|line| line.request(flags, level, CONSUMER))
        .with_context(|| format!("requesting gpio line {}", offset))?;
    CdevPin::new(handle).map_err(|e| anyhow!("gpio line {}: {:?}", offset, e))
}

/// Bring up the controller and return it with the backlight line (still off).
pub fn open_display(
    spi_device: &Path,
    gpio_chip: &Path,
    pins: PanelPins,
    spi_hz: u32,
    width: u16,
    height: u16,
) -> Result<(PanelDisplay, CdevPin)> {
    static BUFFER: StaticCell<[u8; SPI_CHUNK]> = StaticCell::new();

    let spi = open_spi(spi_device, spi_hz)?;
    let mut chip = open_chip(gpio_chip)?;
    let dc = request_line(&mut chip, pins.dc, LineRequestFlags::OUTPUT, 0)?;
    let reset = request_line(&mut chip, pins.reset, LineRequestFlags::OUTPUT, 1)?;
    let mut backlight = request_line(&mut chip, pins.backlight, LineRequestFlags::OUTPUT, 0)?;
    backlight
        .set_low()
        .map_err(|e| anyhow!("backlight line: {:?}", e))?;

    let buffer: &'static mut [u8] = BUFFER
        .try_init([0; SPI_CHUNK])
        .ok_or_else(|| anyhow!("panel already opened"))?;
    let interface = SpiInterface::new(spi, dc, buffer);
    let display = Builder::new(ST7789, interface)
        .display_size(width, height)
        .reset_pin(reset)
        .init(&mut Delay)
        .map_err(|e| anyhow!("st7789 init: {:?}", e))?;

    info!(
        "st7789 initialized ({}x{}) on {} at {} Hz",
        width,
        height,
        spi_device.display(),
        spi_hz
    );
    Ok((display, backlight))
}

/// Request every button line as an input.
pub fn open_buttons(gpio_chip: &Path, pins: ButtonPins) -> Result<GpioButtons<CdevPin>> {
    let mut chip = open_chip(gpio_chip)?;
    let mut lines = Vec::with_capacity(Button::ALL.len());
    for button in Button::ALL {
        let line = request_line(&mut chip, pins.pin(button), LineRequestFlags::INPUT, 0)?;
        lines.push((button, line));
    }
    Ok(GpioButtons::new(lines))
}
