//! Named loop timings.

use std::time::Duration;

use crate::types::{InputClass, DIRECTION_DEBOUNCE_MS, IDLE_MS, MODE_DEBOUNCE_MS, TICK_MS};

/// Hold applied after an input of each class was acted on, so a button
/// held across iterations is not applied again immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebouncePolicy {
    pub mode: Duration,
    pub direction: Duration,
}

impl DebouncePolicy {
    pub fn hold_for(&self, class: InputClass) -> Duration {
        match class {
            InputClass::Mode => self.mode,
            InputClass::Direction => self.direction,
        }
    }
}

impl Default for DebouncePolicy {
    fn default() -> Self {
        Self {
            mode: Duration::from_millis(MODE_DEBOUNCE_MS),
            direction: Duration::from_millis(DIRECTION_DEBOUNCE_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub debounce: DebouncePolicy,
    /// Hold after each movement tick (game speed)
    pub tick_interval: Duration,
    /// Hold per iteration while not playing
    pub idle_interval: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            debounce: DebouncePolicy::default(),
            tick_interval: Duration::from_millis(TICK_MS),
            idle_interval: Duration::from_millis(IDLE_MS),
        }
    }
}
