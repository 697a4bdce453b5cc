use std::{num::ParseIntError, str::FromStr};

use cellular_sandbox_core::{AutomatonKind, CellCoord, CellState, Command, Dimensions};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Single cell assignment given on the command line as `x,y[,state]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CellSpec {
    cell: CellCoord,
    state: CellState,
}

impl CellSpec {
    /// Edit command that applies the assignment.
    pub(crate) fn command(self) -> Command {
        Command::SetCell {
            cell: self.cell,
            state: self.state,
        }
    }
}

/// Reasons a `--cell` value could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CellSpecError {
    /// The value did not contain two or three comma separated fields.
    #[error("expected `x,y` or `x,y,state`, got `{0}`")]
    Shape(String),
    /// One of the fields was not a non-negative integer in range.
    #[error("invalid {field} `{value}`: {source}")]
    Number {
        /// Name of the offending field.
        field: &'static str,
        /// Raw text of the field.
        value: String,
        /// Integer parsing failure.
        source: ParseIntError,
    },
}

impl FromStr for CellSpec {
    type Err = CellSpecError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = value.split(',').map(str::trim).collect();
        let (column, row, state) = match fields.as_slice() {
            [column, row] => (*column, *row, "1"),
            [column, row, state] => (*column, *row, *state),
            _ => return Err(CellSpecError::Shape(value.to_owned())),
        };

        Ok(Self {
            cell: CellCoord::new(parse_field("x", column)?, parse_field("y", row)?),
            state: CellState::new(parse_field("state", state)?),
        })
    }
}

fn parse_field<T>(field: &'static str, value: &str) -> Result<T, CellSpecError>
where
    T: FromStr<Err = ParseIntError>,
{
    value.parse().map_err(|source| CellSpecError::Number {
        field,
        value: value.to_owned(),
        source,
    })
}

/// Parses a random-soup density, accepting values in `0.0..=1.0`.
pub(crate) fn parse_density(value: &str) -> Result<f64, String> {
    let density: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if (0.0..=1.0).contains(&density) {
        Ok(density)
    } else {
        Err(format!("density must lie between 0 and 1, got {density}"))
    }
}

/// Edit commands that fill the grid with a reproducible random soup.
///
/// Each cell is live with probability `density`. Wireworld cells pick any
/// non-empty state uniformly; the other automata use state `1`.
pub(crate) fn random_soup(
    kind: AutomatonKind,
    dimensions: Dimensions,
    density: f64,
    seed: u64,
) -> Vec<Command> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut commands = Vec::new();
    for row in 0..dimensions.rows() {
        for column in 0..dimensions.columns() {
            if !rng.gen_bool(density) {
                continue;
            }
            let state = match kind {
                AutomatonKind::Wireworld => rng.gen_range(1..kind.state_count()),
                AutomatonKind::GameOfLife | AutomatonKind::LangtonsAnt => 1,
            };
            commands.push(Command::SetCell {
                cell: CellCoord::new(column, row),
                state: CellState::new(state),
            });
        }
    }
    commands
}
