//! Button input module (engine-facing).
//!
//! Every physical input (GPIO buttons, a terminal keyboard, a test script)
//! is a [`ButtonSource`] reporting the level of the seven logical buttons.
//! The [`InputSampler`] polls them all and ORs the snapshots, so the game
//! never knows which device a press came from.

pub mod handler;
pub mod map;
pub mod source;

pub use pi_snake_types as types;

pub use handler::{KeyHold, KeyboardSource};
pub use map::{map_key, should_quit};
pub use source::{ButtonSource, InputSampler, ScriptedButtons, SkippedSource};
