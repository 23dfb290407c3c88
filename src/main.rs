//! Pi Snake runner (default binary).
//!
//! Draws on the ST7789 panel and mirrors every frame to the terminal; reads
//! the GPIO buttons and the keyboard. Either output or either input may be
//! missing, but not both.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use log::{error, info};

use pi_snake::app::{self, InitError};
use pi_snake::config::AppConfig;
use pi_snake::core::{GameConfig, GameEngine};
use pi_snake::engine::{Pacing, Scheduler, SystemClock};
use pi_snake::logging;
use pi_snake::render::{Compositor, Layout};

fn seed_from_time() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// One line on stderr. The keyboard may already have raw mode on, so the
/// line ends with an explicit carriage return.
fn notice(line: &str) {
    eprint!("pi-snake: {}\r\n", line);
}

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    if let Err(e) = logging::init(&config.log_path, config.log_level) {
        eprintln!("pi-snake: logging disabled: {:#}", e);
    }

    let result = run(&config);
    match &result {
        Ok(()) => info!("clean shutdown"),
        Err(e) => error!("fatal: {:#}", e),
    }
    result
}

fn run(config: &AppConfig) -> Result<()> {
    info!("starting: {:?}", config);

    let seed = config.seed.unwrap_or_else(seed_from_time);
    let mut engine = GameEngine::new(GameConfig::default(), seed).map_err(InitError::from)?;
    info!("rng seed {}", seed);

    let mut input = app::build_input(config);
    let mut gfx = Compositor::new(Layout::default());
    app::attach_panel(&mut gfx, config);

    // Report before the mirror takes the screen.
    for line in app::startup_report(&gfx, &input) {
        notice(&line);
    }
    let reported = gfx.degraded().len();
    app::attach_mirror(&mut gfx, config);
    for sink in &gfx.degraded()[reported..] {
        notice(&app::degraded_line(sink));
    }
    app::check_ready(&gfx, &input)?;

    engine.enter_menu(&mut gfx);
    let mut scheduler = Scheduler::new(SystemClock, Pacing::default());
    scheduler.run(&mut engine, &mut input, &mut gfx)?;
    Ok(())
}
