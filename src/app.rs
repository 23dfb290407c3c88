//! Process startup: bring up sinks and input sources from configuration.

use std::fmt;
use std::io::IsTerminal;

use log::info;

use crate::config::AppConfig;
use crate::core::ConfigError;
use crate::input::{InputSampler, KeyboardSource, SkippedSource};
use crate::panel::{open_buttons, open_panel};
use crate::render::{Compositor, DegradedSink, SinkError};
use crate::term::TerminalMirror;

/// Startup failures that stop the process before the loop runs.
#[derive(Debug)]
pub enum InitError {
    /// Every display sink failed to come up.
    NoDisplaySink,
    /// No button source could be opened.
    NoInput,
    InvalidConfig(ConfigError),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::NoDisplaySink => write!(f, "no display sink available"),
            InitError::NoInput => write!(f, "no input source available"),
            InitError::InvalidConfig(e) => write!(f, "invalid game rules: {}", e),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InitError::InvalidConfig(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> Self {
        InitError::InvalidConfig(e)
    }
}

/// Attach the panel if enabled; a failure degrades instead of aborting.
pub fn attach_panel(gfx: &mut Compositor, config: &AppConfig) {
    if !config.panel_enabled {
        info!("panel disabled by configuration");
        return;
    }
    let layout = gfx.layout();
    let panel = open_panel(
        &config.spi_device,
        &config.gpio_chip,
        config.panel_pins,
        config.spi_hz,
        layout.width_px,
        layout.height_px,
    );
    gfx.attach("st7789", panel);
}

/// Attach the terminal mirror if enabled and stdout is a terminal. Once
/// attached the mirror owns the screen.
pub fn attach_mirror(gfx: &mut Compositor, config: &AppConfig) {
    if !config.mirror_enabled {
        info!("terminal mirror disabled by configuration");
        return;
    }
    let layout = gfx.layout();
    let mirror = if std::io::stdout().is_terminal() {
        TerminalMirror::open(layout.width_px, layout.height_px, config.mirror_scale)
    } else {
        Err(SinkError::Unavailable("stdout is not a terminal".to_string()))
    };
    gfx.attach("terminal", mirror);
}

/// Open every enabled button source; failures are recorded and skipped.
pub fn build_input(config: &AppConfig) -> InputSampler {
    let mut input = InputSampler::new();
    if config.buttons_enabled {
        input.attach("gpio", open_buttons(&config.gpio_chip, config.button_pins));
    }
    input.attach("keyboard", KeyboardSource::open());
    input
}

pub fn degraded_line(sink: &DegradedSink) -> String {
    format!("display '{}' failed: {}", sink.name, sink.error)
}

pub fn skipped_line(source: &SkippedSource) -> String {
    format!("input '{}' unavailable: {}", source.name, source.reason)
}

/// One line per sink or input source that failed to come up.
pub fn startup_report(gfx: &Compositor, input: &InputSampler) -> Vec<String> {
    gfx.degraded()
        .iter()
        .map(degraded_line)
        .chain(input.skipped().iter().map(skipped_line))
        .collect()
}

/// Refuse to start without at least one sink and one input source.
pub fn check_ready(gfx: &Compositor, input: &InputSampler) -> Result<(), InitError> {
    if gfx.sink_count() == 0 {
        return Err(InitError::NoDisplaySink);
    }
    if input.is_empty() {
        return Err(InitError::NoInput);
    }
    info!(
        "ready: sinks [{}], {} degraded, {} input source(s)",
        gfx.sink_names().join(", "),
        gfx.degraded().len(),
        input.source_count()
    );
    Ok(())
}
