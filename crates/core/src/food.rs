//! Food slots - a fixed number of cells the snake can eat.

use arrayvec::ArrayVec;

use pi_snake_types::{Position, MAX_FOOD_SLOTS};

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::snake::Snake;

/// Up to [`MAX_FOOD_SLOTS`] food cells, stored inline.
#[derive(Debug, Clone, Default)]
pub struct FoodSet {
    slots: ArrayVec<Position, MAX_FOOD_SLOTS>,
}

impl FoodSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Position> {
        self.slots.get(index).copied()
    }

    pub fn positions(&self) -> &[Position] {
        &self.slots
    }

    /// Slot holding `p`, if any
    pub fn find(&self, p: Position) -> Option<usize> {
        self.slots.iter().position(|&f| f == p)
    }

    pub fn contains(&self, p: Position) -> bool {
        self.find(p).is_some()
    }

    /// Append a slot. Returns false when all slots are in use.
    pub fn push(&mut self, p: Position) -> bool {
        self.slots.try_push(p).is_ok()
    }

    /// Move an existing slot. Out-of-range indices are ignored.
    pub fn replace(&mut self, index: usize, p: Position) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = p;
        }
    }

    /// Pick a random playable cell not covered by the snake or any food.
    ///
    /// Rejection sampling; terminates as long as a free cell exists, which
    /// rule validation guarantees.
    pub fn sample_free(&self, grid: &Grid, snake: &Snake, rng: &mut SimpleRng) -> Position {
        debug_assert!(
            snake.len() + self.slots.iter().filter(|&&f| !snake.contains(f)).count()
                < grid.playable_cells(),
            "no free cell left for food"
        );
        loop {
            let x = rng.next_range(grid.width as u32) as u16;
            let y = grid.hud_rows + rng.next_range(grid.playable_rows() as u32) as u16;
            let p = Position::new(x, y);
            if !snake.contains(p) && !self.contains(p) {
                return p;
            }
        }
    }
}
