#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure rule engine for Wireworld.
//!
//! Every cell is updated simultaneously from the previous generation:
//! heads decay into tails, tails cool back into wire, and wire ignites when
//! exactly one or two of its Moore neighbours carry an electron head.

use cellular_sandbox_core::{AutomatonKind, CellState, Grid, RuleEngine};

/// Cell alphabet of Wireworld.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WireCell {
    /// Insulating background.
    Empty,
    /// Leading edge of an electron.
    Head,
    /// Trailing edge of an electron.
    Tail,
    /// Conductor that carries electrons.
    Wire,
}

impl WireCell {
    /// Raw grid state representing the cell.
    #[must_use]
    pub const fn state(self) -> CellState {
        match self {
            Self::Empty => CellState::new(0),
            Self::Head => CellState::new(1),
            Self::Tail => CellState::new(2),
            Self::Wire => CellState::new(3),
        }
    }

    /// Decodes a raw grid state, rejecting values outside the alphabet.
    #[must_use]
    pub const fn from_state(state: CellState) -> Option<Self> {
        match state.get() {
            0 => Some(Self::Empty),
            1 => Some(Self::Head),
            2 => Some(Self::Tail),
            3 => Some(Self::Wire),
            _ => None,
        }
    }

    /// Applies the transition given the number of neighbouring heads.
    #[must_use]
    pub const fn next(self, neighboring_heads: u8) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Head => Self::Tail,
            Self::Tail => Self::Wire,
            Self::Wire => match neighboring_heads {
                1 | 2 => Self::Head,
                _ => Self::Wire,
            },
        }
    }
}

/// Computes the next generation from `grid` without modifying it.
#[must_use]
pub fn next_generation(grid: &Grid) -> Grid {
    let head = WireCell::Head.state();
    grid.map_cells(|cell, state| match WireCell::from_state(state) {
        Some(WireCell::Wire) => {
            let heads = grid.neighbor_count(cell, |neighbor| neighbor == head);
            WireCell::Wire.next(heads).state()
        }
        Some(current) => current.next(0).state(),
        None => WireCell::Empty.state(),
    })
}

/// Wireworld rule engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct Wireworld;

impl Wireworld {
    /// Creates a new Wireworld engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RuleEngine for Wireworld {
    fn kind(&self) -> AutomatonKind {
        AutomatonKind::Wireworld
    }

    fn step(&mut self, grid: &mut Grid) {
        *grid = next_generation(grid);
    }
}
