#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for the Cellular Sandbox.
//!
//! The [`World`] owns exactly one grid together with the rule engine of the
//! active automaton. It is the single mutation point: adapters either call its
//! methods directly or submit [`Command`] values through [`apply`], which
//! reports every observable change as an [`Event`].

use cellular_sandbox_core::{
    AutomatonKind, CellCoord, CellState, Command, Dimensions, EditError, Event, Grid,
    Heading, RuleEngine, StepRate,
};
use cellular_sandbox_system_langton::LangtonsAnt;
use cellular_sandbox_system_life::Life;
use cellular_sandbox_system_wireworld::Wireworld;
use tracing::{debug, trace};

/// Grid height used by the sandbox when nothing else is configured.
pub const DEFAULT_ROWS: u32 = 120;
/// Grid width used by the sandbox when nothing else is configured.
pub const DEFAULT_COLUMNS: u32 = 190;

/// Rule engine of the active automaton, selected by tag.
#[derive(Clone, Debug)]
enum Engine {
    Life(Life),
    Langton(LangtonsAnt),
    Wireworld(Wireworld),
}

impl Engine {
    fn for_kind(kind: AutomatonKind, dimensions: Dimensions) -> Self {
        match kind {
            AutomatonKind::GameOfLife => Self::Life(Life::new()),
            AutomatonKind::LangtonsAnt => Self::Langton(LangtonsAnt::new(dimensions)),
            AutomatonKind::Wireworld => Self::Wireworld(Wireworld::new()),
        }
    }

    fn rule(&self) -> &dyn RuleEngine {
        match self {
            Self::Life(engine) => engine,
            Self::Langton(engine) => engine,
            Self::Wireworld(engine) => engine,
        }
    }

    fn rule_mut(&mut self) -> &mut dyn RuleEngine {
        match self {
            Self::Life(engine) => engine,
            Self::Langton(engine) => engine,
            Self::Wireworld(engine) => engine,
        }
    }
}

/// Timed playback settings consumed by the cadence system.
#[derive(Clone, Copy, Debug)]
struct Playback {
    running: bool,
    rate: StepRate,
}

/// Represents the authoritative sandbox state.
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    engine: Engine,
    generation: u64,
    playback: Playback,
}

impl World {
    /// Creates a world running the given automaton on a zeroed grid.
    #[must_use]
    pub fn new(kind: AutomatonKind, dimensions: Dimensions) -> Self {
        Self {
            grid: Grid::new(dimensions),
            engine: Engine::for_kind(kind, dimensions),
            generation: 0,
            playback: Playback {
                running: false,
                rate: StepRate::DEFAULT,
            },
        }
    }

    /// Replaces the active automaton, discarding the previous grid entirely.
    pub fn select(&mut self, kind: AutomatonKind, dimensions: Dimensions) {
        debug!(
            automaton = %kind,
            rows = dimensions.rows(),
            columns = dimensions.columns(),
            "selecting automaton"
        );
        self.grid = Grid::new(dimensions);
        self.engine = Engine::for_kind(kind, dimensions);
        self.generation = 0;
    }

    /// Advances the active automaton by exactly one generation.
    pub fn step(&mut self) {
        self.engine.rule_mut().step(&mut self.grid);
        self.generation = self.generation.saturating_add(1);
        trace!(generation = self.generation, "generation advanced");
    }

    /// Stores a state in a cell, returning whether the grid changed.
    ///
    /// Coordinates outside the grid and states outside the active alphabet are
    /// ignored.
    pub fn set_cell(&mut self, cell: CellCoord, state: CellState) -> bool {
        matches!(self.try_set_cell(cell, state), Ok(Some(_)))
    }

    /// Stores a state in a cell, reporting why the edit was refused.
    ///
    /// Returns the previous state when the grid changed and `None` when the
    /// cell already held `state`.
    pub fn try_set_cell(
        &mut self,
        cell: CellCoord,
        state: CellState,
    ) -> Result<Option<CellState>, EditError> {
        let previous = self.grid.get(cell).ok_or(EditError::OutOfBounds)?;
        if !self.automaton().accepts(state) {
            return Err(EditError::InvalidState);
        }
        if self.grid.set(cell, state) {
            Ok(Some(previous))
        } else {
            Ok(None)
        }
    }

    /// Zeroes the grid and returns any actor to its starting position.
    pub fn clear(&mut self) {
        debug!(automaton = %self.automaton(), "clearing grid");
        self.grid.clear();
        self.engine.rule_mut().reset(self.grid.dimensions());
        self.generation = 0;
    }

    /// State of a cell, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<CellState> {
        self.grid.get(cell)
    }

    /// Size of the active grid.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// Automaton currently simulated.
    #[must_use]
    pub fn automaton(&self) -> AutomatonKind {
        self.engine.rule().kind()
    }

    /// Generations computed since the last selection or clear.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Position of the Langton's Ant actor, if the automaton has one.
    #[must_use]
    pub fn ant_position(&self) -> Option<CellCoord> {
        self.engine.rule().ant().map(|ant| ant.position)
    }

    /// Heading of the Langton's Ant actor, if the automaton has one.
    #[must_use]
    pub fn ant_heading(&self) -> Option<Heading> {
        self.engine.rule().ant().map(|ant| ant.heading)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(
            AutomatonKind::GameOfLife,
            Dimensions::new(DEFAULT_ROWS, DEFAULT_COLUMNS),
        )
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SelectAutomaton { kind, dimensions } => {
            if world.playback.running {
                world.playback.running = false;
                out_events.push(Event::PlaybackChanged { running: false });
            }
            world.select(kind, dimensions);
            out_events.push(Event::AutomatonSelected {
                kind,
                dimensions: world.dimensions(),
            });
        }
        Command::Step => {
            world.step();
            out_events.push(Event::GenerationAdvanced {
                generation: world.generation,
            });
        }
        Command::SetCell { cell, state } => match world.try_set_cell(cell, state) {
            Ok(Some(from)) => out_events.push(Event::CellChanged {
                cell,
                from,
                to: state,
            }),
            Ok(None) => {}
            Err(reason) => out_events.push(Event::CellEditRejected {
                cell,
                state,
                reason,
            }),
        },
        Command::Clear => {
            world.clear();
            out_events.push(Event::Cleared);
        }
        Command::SetPlayback { running } => {
            if world.playback.running != running {
                world.playback.running = running;
                out_events.push(Event::PlaybackChanged { running });
            }
        }
        Command::SetStepRate { rate } => {
            if world.playback.rate != rate {
                world.playback.rate = rate;
                out_events.push(Event::StepRateChanged { rate });
            }
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use cellular_sandbox_core::{Ant, AutomatonKind, Grid, StepRate};

    /// Automaton currently simulated.
    #[must_use]
    pub fn automaton(world: &World) -> AutomatonKind {
        world.automaton()
    }

    /// Provides read-only access to the active grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Generations computed since the last selection or clear.
    #[must_use]
    pub fn generation(world: &World) -> u64 {
        world.generation
    }

    /// Snapshot of the Langton's Ant actor, if present.
    #[must_use]
    pub fn ant(world: &World) -> Option<Ant> {
        world.engine.rule().ant()
    }

    /// Number of cells holding a non-zero state.
    #[must_use]
    pub fn population(world: &World) -> usize {
        world.grid.population()
    }

    /// Reports whether timed playback is running.
    #[must_use]
    pub fn is_running(world: &World) -> bool {
        world.playback.running
    }

    /// Active playback speed.
    #[must_use]
    pub fn step_rate(world: &World) -> StepRate {
        world.playback.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellular_sandbox_core::Ant;

    #[test]
    fn default_world_matches_sandbox_defaults() {
        let world = World::default();
        assert_eq!(world.automaton(), AutomatonKind::GameOfLife);
        assert_eq!(world.dimensions(), Dimensions::new(120, 190));
        assert_eq!(query::step_rate(&world), StepRate::DEFAULT);
        assert!(!query::is_running(&world));
    }

    #[test]
    fn try_set_cell_reports_rejection_reason() {
        let mut world = World::new(AutomatonKind::Wireworld, Dimensions::new(4, 4));
        assert_eq!(
            world.try_set_cell(CellCoord::new(4, 0), CellState::new(1)),
            Err(EditError::OutOfBounds)
        );
        assert_eq!(
            world.try_set_cell(CellCoord::new(0, 0), CellState::new(4)),
            Err(EditError::InvalidState)
        );
        assert_eq!(
            world.try_set_cell(CellCoord::new(0, 0), CellState::new(3)),
            Ok(Some(CellState::ZERO))
        );
        assert_eq!(
            world.try_set_cell(CellCoord::new(0, 0), CellState::new(3)),
            Ok(None)
        );
    }

    #[test]
    fn ant_queries_are_absent_for_cellular_rules() {
        let world = World::new(AutomatonKind::Wireworld, Dimensions::new(4, 4));
        assert_eq!(world.ant_position(), None);
        assert_eq!(world.ant_heading(), None);
        assert_eq!(query::ant(&world), None::<Ant>);
    }

    #[test]
    fn step_counts_generations() {
        let mut world = World::new(AutomatonKind::GameOfLife, Dimensions::new(4, 4));
        world.step();
        world.step();
        assert_eq!(world.generation(), 2);
        world.clear();
        assert_eq!(world.generation(), 0);
    }
}
