//! Process configuration from environment variables.
//!
//! There is no config file. Unset or unparsable variables fall back to the
//! defaults.

use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;

use crate::panel::{ButtonPins, PanelPins, DEFAULT_SPI_HZ};

pub const DEFAULT_SPI_DEVICE: &str = "/dev/spidev0.0";
pub const DEFAULT_GPIO_CHIP: &str = "/dev/gpiochip0";
pub const DEFAULT_LOG_PATH: &str = "pi-snake.log";
pub const DEFAULT_MIRROR_SCALE: u16 = 4;
pub const MAX_MIRROR_SCALE: u16 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub panel_enabled: bool,
    pub spi_device: PathBuf,
    /// SPI clock; mode 0 is fixed
    pub spi_hz: u32,
    pub gpio_chip: PathBuf,
    pub panel_pins: PanelPins,
    pub mirror_enabled: bool,
    /// Panel pixels per mirror sample
    pub mirror_scale: u16,
    pub buttons_enabled: bool,
    pub button_pins: ButtonPins,
    /// Fixed RNG seed; `None` derives one from the clock
    pub seed: Option<u32>,
    pub log_path: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            panel_enabled: true,
            spi_device: PathBuf::from(DEFAULT_SPI_DEVICE),
            spi_hz: DEFAULT_SPI_HZ,
            gpio_chip: PathBuf::from(DEFAULT_GPIO_CHIP),
            panel_pins: PanelPins::default(),
            mirror_enabled: true,
            mirror_scale: DEFAULT_MIRROR_SCALE,
            buttons_enabled: true,
            button_pins: ButtonPins::default(),
            seed: None,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            log_level: LevelFilter::Info,
        }
    }
}

fn flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("1") | Some("true") | Some("TRUE") | Some("yes")
    )
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

impl AppConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (the environment, or a map in tests)
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let mirror_scale = get("SNAKE_MIRROR_SCALE")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_MIRROR_SCALE)
            .clamp(1, MAX_MIRROR_SCALE);

        let log_level = get("SNAKE_LOG_LEVEL")
            .and_then(|s| LevelFilter::from_str(s.trim()).ok())
            .unwrap_or(defaults.log_level);

        Self {
            panel_enabled: !flag(get("SNAKE_PANEL_DISABLED")),
            spi_device: non_empty(get("SNAKE_SPI_DEVICE"))
                .map(PathBuf::from)
                .unwrap_or(defaults.spi_device),
            spi_hz: get("SNAKE_SPI_HZ")
                .and_then(|s| s.trim().parse::<u32>().ok())
                .filter(|&hz| hz > 0)
                .unwrap_or(defaults.spi_hz),
            gpio_chip: non_empty(get("SNAKE_GPIO_CHIP"))
                .map(PathBuf::from)
                .unwrap_or(defaults.gpio_chip),
            panel_pins: defaults.panel_pins,
            mirror_enabled: !flag(get("SNAKE_MIRROR_DISABLED")),
            mirror_scale,
            buttons_enabled: !flag(get("SNAKE_BUTTONS_DISABLED")),
            button_pins: defaults.button_pins,
            seed: get("SNAKE_SEED").and_then(|s| s.trim().parse().ok()),
            log_path: non_empty(get("SNAKE_LOG_PATH"))
                .map(PathBuf::from)
                .unwrap_or(defaults.log_path),
            log_level,
        }
    }
}
