//! Core game logic module - rules, state machine, deterministic simulation
//!
//! This crate contains the snake rules and the session state machine. It
//! talks to displays only through a [`pi_snake_render::Compositor`] passed
//! into each call, and to input only through [`pi_snake_types::ButtonState`]
//! snapshots, so it runs the same against a panel, a terminal or nothing.
//!
//! # Module Structure
//!
//! - [`grid`]: playfield geometry and session rules (`GameConfig`)
//! - [`snake`]: ordered body segments, head first
//! - [`food`]: fixed-capacity food slots and free-cell sampling
//! - [`rng`]: seeded LCG for reproducible food placement
//! - [`screens`]: menu / game-over / clear pages, score bar, palette
//! - [`game_state`]: the `GameEngine` mode machine and per-tick movement
//!
//! # Game Rules
//!
//! - The snake starts with 3 segments in the middle of the playfield, facing right
//! - Each tick moves the head one cell; the tail follows unless food was eaten
//! - Leaving the grid, entering the score bar or hitting the body ends the game
//! - Reaching one full row's worth of points clears the game
//! - A reversal onto the neck is ignored
//!
//! # Example
//!
//! ```
//! use pi_snake_core::{GameConfig, GameEngine, TickOutcome};
//! use pi_snake_render::{Compositor, Layout, MemorySink};
//! use pi_snake_types::{Button, ButtonState, Mode};
//!
//! let mut gfx = Compositor::new(Layout::default());
//! gfx.register(Box::new(MemorySink::new("mem", 240, 240)));
//!
//! let mut game = GameEngine::new(GameConfig::default(), 12345).unwrap();
//! game.enter_menu(&mut gfx);
//! game.handle_input(ButtonState::empty().with(Button::Confirm), &mut gfx);
//! assert_eq!(game.mode(), Mode::Playing);
//!
//! let outcome = game.tick(&mut gfx);
//! assert!(matches!(outcome, TickOutcome::Moved | TickOutcome::Ate { .. }));
//! ```

pub mod food;
pub mod game_state;
pub mod grid;
pub mod rng;
pub mod screens;
pub mod snake;

pub use pi_snake_render as render;
pub use pi_snake_types as types;

pub use food::FoodSet;
pub use game_state::{Collision, GameEngine, TickOutcome};
pub use grid::{ConfigError, GameConfig, Grid};
pub use rng::SimpleRng;
pub use snake::Snake;
