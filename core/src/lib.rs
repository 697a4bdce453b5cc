#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Cellular Sandbox engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. The toroidal [`Grid`] and the [`RuleEngine`]
//! seam live here so that every automaton crate builds on the same data
//! structure without depending on the world.

mod grid;

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

pub use grid::Grid;

/// Title shown by adapters when the sandbox starts.
pub const SANDBOX_TITLE: &str = "Cellular Automata Sandbox";

/// Automata supported by the sandbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutomatonKind {
    /// Conway's Game of Life over the alphabet {dead, alive}.
    GameOfLife,
    /// Langton's Ant over the alphabet {white, black} plus a mobile actor.
    LangtonsAnt,
    /// Wireworld over the alphabet {empty, head, tail, wire}.
    Wireworld,
}

impl AutomatonKind {
    /// Every automaton in menu order.
    pub const ALL: [AutomatonKind; 3] = [Self::GameOfLife, Self::LangtonsAnt, Self::Wireworld];

    /// Number of distinct cell states in the automaton's alphabet.
    #[must_use]
    pub const fn state_count(self) -> u8 {
        match self {
            Self::GameOfLife | Self::LangtonsAnt => 2,
            Self::Wireworld => 4,
        }
    }

    /// Reports whether the provided state belongs to the automaton's alphabet.
    #[must_use]
    pub const fn accepts(self, state: CellState) -> bool {
        state.get() < self.state_count()
    }

    /// Human readable name used for menus and titles.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::GameOfLife => "Conway's Game of Life",
            Self::LangtonsAnt => "Langton's Ant",
            Self::Wireworld => "Wireworld",
        }
    }
}

impl fmt::Display for AutomatonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Raw state stored in a single grid cell.
///
/// The meaning of the value depends on the active automaton; state `0` is the
/// quiescent state for every alphabet.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellState(u8);

impl CellState {
    /// Quiescent state shared by all automata.
    pub const ZERO: CellState = CellState(0);

    /// Wraps the provided raw state value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the raw state value.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Reports whether the state is the quiescent state.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell (the `x` axis).
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell (the `y` axis).
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Size of a grid measured in whole cells.
///
/// Both axes hold at least one cell so every grid has a well defined centre.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    rows: u32,
    columns: u32,
}

impl Dimensions {
    /// Creates a new size descriptor, clamping each axis to at least one cell.
    #[must_use]
    pub const fn new(rows: u32, columns: u32) -> Self {
        let rows = if rows == 0 { 1 } else { rows };
        let columns = if columns == 0 { 1 } else { columns };
        Self { rows, columns }
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Cell at the centre of the grid, rounding towards the origin.
    #[must_use]
    pub const fn center(&self) -> CellCoord {
        CellCoord::new(self.columns / 2, self.rows / 2)
    }
}

/// Facing of the Langton's Ant actor.
///
/// Variants are listed in clockwise order so a right turn advances the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Towards decreasing row indices.
    Up,
    /// Towards increasing column indices.
    Right,
    /// Towards increasing row indices.
    Down,
    /// Towards decreasing column indices.
    Left,
}

impl Heading {
    const CLOCKWISE: [Heading; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Position of the heading within the clockwise ordering.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    /// Heading obtained after a quarter turn to the right.
    #[must_use]
    pub const fn turn_clockwise(self) -> Self {
        Self::CLOCKWISE[(self.index() + 1) % 4]
    }

    /// Heading obtained after a quarter turn to the left.
    #[must_use]
    pub const fn turn_counter_clockwise(self) -> Self {
        Self::CLOCKWISE[(self.index() + 3) % 4]
    }

    /// Column and row delta of a single step in this heading.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

/// Position and facing of the Langton's Ant actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ant {
    /// Cell currently occupied by the ant.
    pub position: CellCoord,
    /// Direction the ant will turn from on its next step.
    pub heading: Heading,
}

impl Ant {
    /// Ant placed at the centre of a grid with the provided size, facing up.
    #[must_use]
    pub const fn centered(dimensions: Dimensions) -> Self {
        Self {
            position: dimensions.center(),
            heading: Heading::Up,
        }
    }
}

/// Playback speed expressed in simulation steps per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct StepRate(u32);

impl StepRate {
    /// Slowest supported rate.
    pub const MIN: StepRate = StepRate(1);
    /// Fastest supported rate.
    pub const MAX: StepRate = StepRate(200);
    /// Rate selected when the sandbox boots.
    pub const DEFAULT: StepRate = StepRate(30);

    /// Creates a rate, clamping the value into the supported range.
    #[must_use]
    pub const fn new(steps_per_second: u32) -> Self {
        if steps_per_second < Self::MIN.0 {
            Self::MIN
        } else if steps_per_second > Self::MAX.0 {
            Self::MAX
        } else {
            Self(steps_per_second)
        }
    }

    /// Number of steps per second.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Wall-clock time between two consecutive steps.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(1) / self.0
    }
}

impl Default for StepRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for StepRate {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<StepRate> for u32 {
    fn from(value: StepRate) -> Self {
        value.0
    }
}

/// Transition function of a single automaton.
///
/// Engines own any state that lives outside the grid, such as the Langton's Ant
/// actor. Synchronous automata must derive the whole next generation from the
/// grid as it was before the call and only then replace it.
pub trait RuleEngine {
    /// Automaton implemented by the engine.
    fn kind(&self) -> AutomatonKind;

    /// Advances the grid by exactly one generation.
    fn step(&mut self, grid: &mut Grid);

    /// Restores engine-held state for a freshly zeroed grid of the given size.
    fn reset(&mut self, _dimensions: Dimensions) {}

    /// Actor carried by the engine, if the automaton has one.
    fn ant(&self) -> Option<Ant> {
        None
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the active automaton with a fresh, zeroed instance.
    SelectAutomaton {
        /// Automaton to activate.
        kind: AutomatonKind,
        /// Size of the new grid.
        dimensions: Dimensions,
    },
    /// Advances the active automaton by one generation.
    Step,
    /// Requests that a single cell take the provided state.
    SetCell {
        /// Cell targeted by the edit.
        cell: CellCoord,
        /// State the cell should hold afterwards.
        state: CellState,
    },
    /// Zeroes the grid and resets any actor state.
    Clear,
    /// Starts or stops timed playback.
    SetPlayback {
        /// Whether playback should be running afterwards.
        running: bool,
    },
    /// Updates the playback speed.
    SetStepRate {
        /// Requested steps per second.
        rate: StepRate,
    },
    /// Reports that wall-clock time elapsed for the cadence system.
    Tick {
        /// Duration that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a new automaton instance became active.
    AutomatonSelected {
        /// Automaton that is now active.
        kind: AutomatonKind,
        /// Size of the new grid.
        dimensions: Dimensions,
    },
    /// Confirms that one generation was computed.
    GenerationAdvanced {
        /// Number of generations computed since the last selection or clear.
        generation: u64,
    },
    /// Confirms that an edit changed a cell.
    CellChanged {
        /// Cell that changed.
        cell: CellCoord,
        /// State held before the edit.
        from: CellState,
        /// State held after the edit.
        to: CellState,
    },
    /// Reports that an edit request was rejected.
    CellEditRejected {
        /// Cell targeted by the edit.
        cell: CellCoord,
        /// State requested by the edit.
        state: CellState,
        /// Specific reason the edit failed.
        reason: EditError,
    },
    /// Confirms that the grid was zeroed.
    Cleared,
    /// Announces that playback started or stopped.
    PlaybackChanged {
        /// Whether playback is running.
        running: bool,
    },
    /// Announces a new playback speed.
    StepRateChanged {
        /// Active steps per second.
        rate: StepRate,
    },
    /// Indicates that wall-clock time advanced.
    TimeAdvanced {
        /// Duration that elapsed in the tick.
        dt: Duration,
    },
}

/// Reasons a cell edit may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditError {
    /// The coordinate lies outside the grid.
    OutOfBounds,
    /// The state is not part of the active automaton's alphabet.
    InvalidState,
}
