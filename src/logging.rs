//! File logging through `fern`.
//!
//! The terminal belongs to the mirror sink, so log lines go to a file.

use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;

/// Install the global logger. Call once, before anything logs.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file = fern::log_file(path).with_context(|| format!("opening log file {}", path.display()))?;
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(file)
        .apply()
        .context("installing logger")?;
    Ok(())
}
