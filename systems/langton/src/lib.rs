#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure rule engine for Langton's Ant.
//!
//! Unlike the synchronous automata, the ant touches a single cell per step:
//! it flips the colour underneath itself, turns according to the colour it
//! found, and walks one cell forward on the torus.

use cellular_sandbox_core::{Ant, AutomatonKind, CellState, Dimensions, Grid, RuleEngine};

/// Cell alphabet of Langton's Ant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AntCell {
    /// Unvisited cell; the ant turns right here.
    White,
    /// Visited cell; the ant turns left here.
    Black,
}

impl AntCell {
    /// Raw grid state representing the cell.
    #[must_use]
    pub const fn state(self) -> CellState {
        match self {
            Self::White => CellState::new(0),
            Self::Black => CellState::new(1),
        }
    }

    /// Decodes a raw grid state, rejecting values outside the alphabet.
    #[must_use]
    pub const fn from_state(state: CellState) -> Option<Self> {
        match state.get() {
            0 => Some(Self::White),
            1 => Some(Self::Black),
            _ => None,
        }
    }

    /// Colour left behind after the ant leaves the cell.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

/// Langton's Ant rule engine carrying the actor state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LangtonsAnt {
    ant: Ant,
}

impl LangtonsAnt {
    /// Creates an engine whose ant starts at the centre of the grid, facing up.
    #[must_use]
    pub const fn new(dimensions: Dimensions) -> Self {
        Self {
            ant: Ant::centered(dimensions),
        }
    }
}

/// Advances the ant by one step, mutating the cell it stands on.
///
/// Returns the ant's new position and heading.
pub fn advance(ant: Ant, grid: &mut Grid) -> Ant {
    let position = grid.wrap(
        i64::from(ant.position.column()),
        i64::from(ant.position.row()),
    );
    let found = grid
        .get(position)
        .and_then(AntCell::from_state)
        .unwrap_or(AntCell::White);
    let _ = grid.set(position, found.flipped().state());

    let heading = match found {
        AntCell::White => ant.heading.turn_clockwise(),
        AntCell::Black => ant.heading.turn_counter_clockwise(),
    };
    let (dx, dy) = heading.offset();

    Ant {
        position: grid.offset(position, dx, dy),
        heading,
    }
}

impl RuleEngine for LangtonsAnt {
    fn kind(&self) -> AutomatonKind {
        AutomatonKind::LangtonsAnt
    }

    fn step(&mut self, grid: &mut Grid) {
        self.ant = advance(self.ant, grid);
    }

    fn reset(&mut self, dimensions: Dimensions) {
        self.ant = Ant::centered(dimensions);
    }

    fn ant(&self) -> Option<Ant> {
        Some(self.ant)
    }
}
