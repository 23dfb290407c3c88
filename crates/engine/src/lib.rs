//! Loop engine - drives a [`GameEngine`](pi_snake_core::GameEngine) in real
//! or simulated time.
//!
//! Single-threaded and cooperative: every hold is a fixed sleep through a
//! [`Clock`], so tests swap in [`ManualClock`] and run the loop without
//! waiting.

pub mod clock;
pub mod pacing;
pub mod scheduler;

pub use pi_snake_types as types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use pacing::{DebouncePolicy, Pacing};
pub use scheduler::{LoopError, LoopStep, Scheduler};
