//! Snake body - ordered segments, head first.

use std::collections::VecDeque;

use pi_snake_types::{Direction, Position};

/// Ordered body segments. The front is the head, the back is the tail.
///
/// Capacity is reserved once for every grid cell, so growing never
/// reallocates during play.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    capacity: usize,
}

impl Snake {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            body: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Lay out a straight snake of `length` segments with the head at
    /// `head`, trailing away from `heading`.
    ///
    /// Segments that would fall off the top/left edge are dropped; callers
    /// validate the geometry first.
    pub fn reset(&mut self, head: Position, heading: Direction, length: usize) {
        self.body.clear();
        let back = heading.opposite();
        let mut segment = Some(head);
        for _ in 0..length {
            let Some(p) = segment else { break };
            self.body.push_back(p);
            segment = p.step(back, u16::MAX, u16::MAX);
        }
        debug_assert!(self.body.len() <= self.capacity);
    }

    pub fn head(&self) -> Option<Position> {
        self.body.front().copied()
    }

    pub fn tail(&self) -> Option<Position> {
        self.body.back().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, p: Position) -> bool {
        self.body.contains(&p)
    }

    /// Segments from head to tail
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Push a new head. Without `grow`, the tail is removed and returned.
    pub fn advance(&mut self, new_head: Position, grow: bool) -> Option<Position> {
        self.body.push_front(new_head);
        let removed = if grow { None } else { self.body.pop_back() };
        debug_assert!(self.body.len() <= self.capacity);
        removed
    }
}
