//! Button sources and the sampler that merges them.

use std::collections::VecDeque;

use log::{info, warn};

use crate::types::ButtonState;

/// Something that can report which logical buttons are down right now.
pub trait ButtonSource {
    fn name(&self) -> &str;

    /// Current level of every button. Non-blocking.
    fn sample(&mut self) -> ButtonState;

    /// The source asked for the process to stop (keyboard quit key).
    fn quit_requested(&self) -> bool {
        false
    }
}

impl<S: ButtonSource + ?Sized> ButtonSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn sample(&mut self) -> ButtonState {
        (**self).sample()
    }

    fn quit_requested(&self) -> bool {
        (**self).quit_requested()
    }
}

/// A source that could not be opened, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub name: String,
    pub reason: String,
}

/// Polls every source and ORs the results: a button is pressed when any
/// source reports it.
#[derive(Default)]
pub struct InputSampler {
    sources: Vec<Box<dyn ButtonSource>>,
    skipped: Vec<SkippedSource>,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, source: Box<dyn ButtonSource>) {
        info!("button source '{}' attached", source.name());
        self.sources.push(source);
    }

    /// Add the outcome of opening a source. Failures are recorded and
    /// logged. Returns whether the source was added.
    pub fn attach<S>(&mut self, name: &str, source: anyhow::Result<S>) -> bool
    where
        S: ButtonSource + 'static,
    {
        match source {
            Ok(source) => {
                self.add(Box::new(source));
                true
            }
            Err(e) => {
                warn!("button source '{}' unavailable: {:#}", name, e);
                self.skipped.push(SkippedSource {
                    name: name.to_string(),
                    reason: format!("{:#}", e),
                });
                false
            }
        }
    }

    /// Sources that failed to open
    pub fn skipped(&self) -> &[SkippedSource] {
        &self.skipped
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn sample(&mut self) -> ButtonState {
        self.sources
            .iter_mut()
            .fold(ButtonState::empty(), |acc, s| acc.merge(s.sample()))
    }

    pub fn quit_requested(&self) -> bool {
        self.sources.iter().any(|s| s.quit_requested())
    }
}

/// Replays a fixed sequence of snapshots, one per sample, then reports
/// nothing pressed. Optionally requests quit once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedButtons {
    frames: VecDeque<ButtonState>,
    quit_when_done: bool,
    samples: usize,
}

impl ScriptedButtons {
    pub fn new(frames: impl IntoIterator<Item = ButtonState>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            quit_when_done: false,
            samples: 0,
        }
    }

    pub fn quit_when_done(mut self) -> Self {
        self.quit_when_done = true;
        self
    }

    /// Snapshots handed out so far
    pub fn samples(&self) -> usize {
        self.samples
    }
}

impl ButtonSource for ScriptedButtons {
    fn name(&self) -> &str {
        "scripted"
    }

    fn sample(&mut self) -> ButtonState {
        self.samples += 1;
        self.frames.pop_front().unwrap_or_default()
    }

    fn quit_requested(&self) -> bool {
        self.quit_when_done && self.frames.is_empty()
    }
}
