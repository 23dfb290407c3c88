//! Grid geometry and session rules.
//!
//! Coordinates: (x, y) where x grows left to right and y top to bottom.
//! Rows `0..hud_rows` belong to the score bar and are never playable.

use std::fmt;

use pi_snake_types::{
    Position, CLEAR_SCORE, FOOD_COUNT, GRID_HEIGHT, GRID_WIDTH, HUD_ROWS, MAX_FOOD_SLOTS,
    START_LENGTH,
};

/// Fixed playfield dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: u16,
    pub height: u16,
    pub hud_rows: u16,
}

impl Grid {
    pub const fn new(width: u16, height: u16, hud_rows: u16) -> Self {
        Self {
            width,
            height,
            hud_rows,
        }
    }

    /// Inside `[0, width) x [0, height)`, HUD included
    pub fn contains(&self, p: Position) -> bool {
        p.x < self.width && p.y < self.height
    }

    /// Inside the area the snake may occupy and food may spawn in
    pub fn is_playable(&self, p: Position) -> bool {
        self.contains(p) && p.y >= self.hud_rows
    }

    pub fn playable_rows(&self) -> u16 {
        self.height.saturating_sub(self.hud_rows)
    }

    pub fn playable_cells(&self) -> usize {
        self.width as usize * self.playable_rows() as usize
    }

    /// Total cells, the hard bound on snake length
    pub fn cells(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Starting head cell: horizontally centered, vertically centered in
    /// the playable rows.
    pub fn start_head(&self) -> Position {
        Position::new(self.width / 2, self.hud_rows + self.playable_rows() / 2)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT, HUD_ROWS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The starting snake does not fit left of the center column.
    TooNarrow { width: u16, start_length: usize },
    NoPlayableRows { height: u16, hud_rows: u16 },
    FoodCount { count: usize, max: usize },
    ZeroClearScore,
    /// A full-length snake plus food could leave no free cell to respawn into.
    NotEnoughFreeCells { needed: usize, available: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TooNarrow {
                width,
                start_length,
            } => write!(
                f,
                "grid width {} cannot hold a starting snake of length {}",
                width, start_length
            ),
            ConfigError::NoPlayableRows { height, hud_rows } => write!(
                f,
                "grid height {} leaves no playable rows below {} HUD rows",
                height, hud_rows
            ),
            ConfigError::FoodCount { count, max } => {
                write!(f, "food count {} outside 1..={}", count, max)
            }
            ConfigError::ZeroClearScore => write!(f, "clear score must be positive"),
            ConfigError::NotEnoughFreeCells { needed, available } => write!(
                f,
                "rules need {} playable cells but the grid has {}",
                needed, available
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Rules of one session. Immutable for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub grid: Grid,
    pub food_count: usize,
    pub clear_score: u32,
    pub start_length: usize,
}

impl GameConfig {
    /// Rules for a grid, with the clear threshold at one full row.
    pub fn for_grid(grid: Grid) -> Self {
        Self {
            grid,
            food_count: FOOD_COUNT,
            clear_score: grid.width as u32,
            start_length: START_LENGTH,
        }
    }

    /// Longest the snake can get: every food but the clearing one grows it.
    pub fn max_snake_length(&self) -> usize {
        self.start_length + self.clear_score as usize - 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = self.grid;
        if self.start_length == 0 || (grid.width / 2) as usize + 1 < self.start_length {
            return Err(ConfigError::TooNarrow {
                width: grid.width,
                start_length: self.start_length,
            });
        }
        if grid.playable_rows() == 0 {
            return Err(ConfigError::NoPlayableRows {
                height: grid.height,
                hud_rows: grid.hud_rows,
            });
        }
        if self.food_count == 0 || self.food_count > MAX_FOOD_SLOTS {
            return Err(ConfigError::FoodCount {
                count: self.food_count,
                max: MAX_FOOD_SLOTS,
            });
        }
        if self.clear_score == 0 {
            return Err(ConfigError::ZeroClearScore);
        }
        // Respawn happens with the snake at most max length and the other
        // food slots occupied; one more cell must remain.
        let needed = self.max_snake_length() + self.food_count;
        let available = grid.playable_cells();
        if needed > available {
            return Err(ConfigError::NotEnoughFreeCells { needed, available });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            food_count: FOOD_COUNT,
            clear_score: CLEAR_SCORE,
            start_length: START_LENGTH,
        }
    }
}
