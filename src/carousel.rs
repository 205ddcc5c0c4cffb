//! Circular selection over the planet catalog.

use crate::catalog::{PlanetDescriptor, CATALOG};

/// One carousel step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

/// Index of the currently displayed planet, always in `0..len`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    current: usize,
    len: usize,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Carousel {
    /// Starts at `start`, wrapped into the catalog
    pub fn new(start: usize) -> Self {
        Carousel {
            current: start % CATALOG.len(),
            len: CATALOG.len(),
        }
    }

    /// Moves one entry in `direction`, wrapping at both ends
    pub fn advance(&mut self, direction: Direction) {
        let len = self.len as isize;
        self.current = ((self.current as isize + direction.step() + len) % len) as usize;
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &'static PlanetDescriptor {
        &CATALOG[self.current]
    }

    pub fn is_current(&self, index: usize) -> bool {
        index == self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }
}
