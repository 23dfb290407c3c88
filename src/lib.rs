//! Pi Snake (workspace facade crate).
//!
//! Re-exports the crates under `crates/` as `pi_snake::{core,engine,input,
//! panel,render,term,types}` and adds the process-level pieces: environment
//! configuration, file logging and startup wiring.

pub use pi_snake_core as core;
pub use pi_snake_engine as engine;
pub use pi_snake_input as input;
pub use pi_snake_panel as panel;
pub use pi_snake_render as render;
pub use pi_snake_term as term;
pub use pi_snake_types as types;

pub mod app;
pub mod config;
pub mod logging;
