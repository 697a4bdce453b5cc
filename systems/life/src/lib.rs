#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure rule engine for Conway's Game of Life on a toroidal grid.

use cellular_sandbox_core::{AutomatonKind, CellState, Grid, RuleEngine};

/// Cell alphabet of the Game of Life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifeCell {
    /// Unpopulated cell.
    Dead,
    /// Populated cell.
    Alive,
}

impl LifeCell {
    /// Raw grid state representing the cell.
    #[must_use]
    pub const fn state(self) -> CellState {
        match self {
            Self::Dead => CellState::new(0),
            Self::Alive => CellState::new(1),
        }
    }

    /// Decodes a raw grid state, rejecting values outside the alphabet.
    #[must_use]
    pub const fn from_state(state: CellState) -> Option<Self> {
        match state.get() {
            0 => Some(Self::Dead),
            1 => Some(Self::Alive),
            _ => None,
        }
    }

    /// Applies the B3/S23 transition given the number of living neighbours.
    #[must_use]
    pub const fn next(self, alive_neighbors: u8) -> Self {
        match (self, alive_neighbors) {
            (Self::Alive, 2 | 3) | (Self::Dead, 3) => Self::Alive,
            _ => Self::Dead,
        }
    }
}

/// Computes the next generation from `grid` without modifying it.
#[must_use]
pub fn next_generation(grid: &Grid) -> Grid {
    let alive = LifeCell::Alive.state();
    grid.map_cells(|cell, state| {
        let current = LifeCell::from_state(state).unwrap_or(LifeCell::Dead);
        let neighbors = grid.neighbor_count(cell, |neighbor| neighbor == alive);
        current.next(neighbors).state()
    })
}

/// Game of Life rule engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct Life;

impl Life {
    /// Creates a new Game of Life engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RuleEngine for Life {
    fn kind(&self) -> AutomatonKind {
        AutomatonKind::GameOfLife
    }

    fn step(&mut self, grid: &mut Grid) {
        *grid = next_generation(grid);
    }
}
