//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (game logic, compositing, input sampling, panel drivers).
//!
//! # Panel and Grid Dimensions
//!
//! The target is a 240x240 ST7789 panel split into square cells:
//!
//! - **Cell size**: 10 pixels
//! - **Grid**: 24 columns x 24 rows (indexed 0-23)
//! - **HUD**: row 0 is reserved for the score bar
//! - **Clear threshold**: one full row of food (24)
//!
//! # Loop Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 120 | Hold after each movement tick (game speed) |
//! | `IDLE_MS` | 50 | Hold per iteration while not simulating |
//! | `MODE_DEBOUNCE_MS` | 200 | Hold after confirm / action presses |
//! | `DIRECTION_DEBOUNCE_MS` | 120 | Hold after an accepted direction change |
//!
//! # Examples
//!
//! ```
//! use pi_snake_types::{Button, ButtonState, Direction, Position, GRID_WIDTH};
//!
//! let head = Position::new(12, 12);
//! assert_eq!(head.step(Direction::Right, GRID_WIDTH, 24), Some(Position::new(13, 12)));
//! assert!(Direction::Left.is_opposite(Direction::Right));
//!
//! let buttons = ButtonState::empty().with(Button::Confirm);
//! assert!(buttons.pressed(Button::Confirm));
//! ```

/// Panel width in pixels
pub const PANEL_WIDTH: u16 = 240;

/// Panel height in pixels
pub const PANEL_HEIGHT: u16 = 240;

/// Edge length of one grid cell in pixels
pub const CELL_SIZE: u16 = 10;

/// Grid width in cells (24 columns)
pub const GRID_WIDTH: u16 = PANEL_WIDTH / CELL_SIZE;

/// Grid height in cells (24 rows)
pub const GRID_HEIGHT: u16 = PANEL_HEIGHT / CELL_SIZE;

/// Grid rows reserved for the score bar
pub const HUD_ROWS: u16 = 1;

/// Number of food slots kept on the field
pub const FOOD_COUNT: usize = 5;

/// Upper bound on food slots (fixed-capacity storage)
pub const MAX_FOOD_SLOTS: usize = 16;

/// Score that clears the game (one full row's worth of cells)
pub const CLEAR_SCORE: u32 = GRID_WIDTH as u32;

/// Snake length at the start of every session
pub const START_LENGTH: usize = 3;

/// Hold after each movement tick
pub const TICK_MS: u64 = 120;

/// Hold per loop iteration while not in play
pub const IDLE_MS: u64 = 50;

/// Debounce after a confirm / action press
pub const MODE_DEBOUNCE_MS: u64 = 200;

/// Debounce after an accepted direction change
pub const DIRECTION_DEBOUNCE_MS: u64 = 120;

/// A grid cell address. Coordinates are unsigned; stepping off the
/// top/left edge is reported as `None` by [`Position::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Advance one cell along `dir`.
    ///
    /// Returns `None` when the move leaves `[0, width) x [0, height)`.
    /// HUD rows are not considered here; that is a game rule.
    pub fn step(self, dir: Direction, width: u16, height: u16) -> Option<Position> {
        let (dx, dy) = dir.offset();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        if x >= width || y >= height {
            return None;
        }
        Some(Position { x, y })
    }
}

/// Snake heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Cell delta for one step (y grows downwards)
    pub fn offset(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Session mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Menu,
    Playing,
    Paused,
    GameOver,
    Cleared,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Menu => "menu",
            Mode::Playing => "playing",
            Mode::Paused => "paused",
            Mode::GameOver => "game_over",
            Mode::Cleared => "cleared",
        }
    }
}

/// Logical buttons, independent of how they are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Action1,
    Action2,
}

impl Button {
    pub const ALL: [Button; 7] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Confirm,
        Button::Action1,
        Button::Action2,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Heading requested by a directional button
    pub fn direction(self) -> Option<Direction> {
        match self {
            Button::Up => Some(Direction::Up),
            Button::Down => Some(Direction::Down),
            Button::Left => Some(Direction::Left),
            Button::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Snapshot of which buttons read as pressed in one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    bits: u8,
}

impl ButtonState {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub fn pressed(&self, button: Button) -> bool {
        self.bits & button.bit() != 0
    }

    pub fn set(&mut self, button: Button, down: bool) {
        if down {
            self.bits |= button.bit();
        } else {
            self.bits &= !button.bit();
        }
    }

    /// Builder-style variant of [`ButtonState::set`]
    pub fn with(mut self, button: Button) -> Self {
        self.set(button, true);
        self
    }

    /// Union of two snapshots (a button is pressed if either source has it)
    pub fn merge(self, other: ButtonState) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

/// Input classes with their own debounce hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputClass {
    /// Confirm / action presses that toggle modes
    Mode,
    /// Accepted heading changes
    Direction,
}
