//! Cooperative main loop: sample, apply, tick or idle, present.

use std::fmt;

use log::{debug, info};

use pi_snake_core::{GameEngine, TickOutcome};
use pi_snake_input::InputSampler;
use pi_snake_render::{Compositor, PresentStatus};

use crate::clock::Clock;
use crate::pacing::Pacing;
use crate::types::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStep {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopError {
    /// Every display sink failed; nothing is left to draw on.
    NoSinks,
}

impl fmt::Display for LoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopError::NoSinks => write!(f, "all display sinks have failed"),
        }
    }
}

impl std::error::Error for LoopError {}

pub struct Scheduler<C: Clock> {
    clock: C,
    pacing: Pacing,
    iterations: u64,
    ticks: u64,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C, pacing: Pacing) -> Self {
        Self {
            clock,
            pacing,
            iterations: 0,
            ticks: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Loop iterations completed
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Movement ticks executed
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One loop iteration.
    ///
    /// Quit is checked once at the top, before anything is drawn, and again
    /// after present; an iteration that started always completes.
    pub fn step(
        &mut self,
        engine: &mut GameEngine,
        input: &mut InputSampler,
        gfx: &mut Compositor,
    ) -> Result<LoopStep, LoopError> {
        if input.quit_requested() {
            return Ok(LoopStep::Quit);
        }

        let buttons = input.sample();
        if let Some(class) = engine.handle_input(buttons, gfx) {
            self.clock.sleep(self.pacing.debounce.hold_for(class));
        }

        if engine.mode() == Mode::Playing {
            let outcome = engine.tick(gfx);
            self.ticks += 1;
            if let TickOutcome::GameOver(_) | TickOutcome::Cleared = outcome {
                debug!("session ended after {} ticks", self.ticks);
            }
            self.clock.sleep(self.pacing.tick_interval);
        } else {
            self.clock.sleep(self.pacing.idle_interval);
        }

        let status = gfx.present();
        self.iterations += 1;

        if gfx.sink_count() == 0 {
            return Err(LoopError::NoSinks);
        }
        if status == PresentStatus::QuitRequested || input.quit_requested() {
            return Ok(LoopStep::Quit);
        }
        Ok(LoopStep::Continue)
    }

    /// Run until a quit request or until every sink has failed.
    pub fn run(
        &mut self,
        engine: &mut GameEngine,
        input: &mut InputSampler,
        gfx: &mut Compositor,
    ) -> Result<(), LoopError> {
        info!(
            "loop started: {} sink(s), {} input source(s)",
            gfx.sink_count(),
            input.source_count()
        );
        loop {
            if self.step(engine, input, gfx)? == LoopStep::Quit {
                info!(
                    "quit requested after {} iterations ({} ticks)",
                    self.iterations, self.ticks
                );
                return Ok(());
            }
        }
    }
}
