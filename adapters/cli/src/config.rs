use std::{fs, io, path::Path, path::PathBuf};

use cellular_sandbox_core::{AutomatonKind, Dimensions, StepRate};
use cellular_sandbox_world::{DEFAULT_COLUMNS, DEFAULT_ROWS};
use serde::Deserialize;
use thiserror::Error;

/// Sandbox settings read from an optional TOML file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SandboxConfig {
    /// Automaton selected at startup.
    pub(crate) automaton: AutomatonKind,
    /// Number of grid rows.
    pub(crate) rows: u32,
    /// Number of grid columns.
    pub(crate) columns: u32,
    /// Generations per second while playing.
    pub(crate) steps_per_second: u32,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            automaton: AutomatonKind::GameOfLife,
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            steps_per_second: StepRate::DEFAULT.get(),
        }
    }
}

impl SandboxConfig {
    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text; missing keys keep their defaults.
    pub(crate) fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

/// Failures raised while loading or resolving sandbox settings.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {}", .path.display())]
    Read {
        /// Location of the unreadable file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The configuration file is not valid TOML for [`SandboxConfig`].
    #[error("malformed configuration")]
    Parse(#[from] toml::de::Error),
    /// A grid axis resolved to zero cells.
    #[error("grid must have at least one row and one column (got {rows} rows, {columns} columns)")]
    EmptyGrid {
        /// Resolved row count.
        rows: u32,
        /// Resolved column count.
        columns: u32,
    },
}

/// Effective settings after command-line overrides are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Automaton to run.
    pub(crate) automaton: AutomatonKind,
    /// Size of the grid.
    pub(crate) dimensions: Dimensions,
    /// Playback speed.
    pub(crate) rate: StepRate,
}

/// Command-line values that take precedence over the configuration file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    pub(crate) automaton: Option<AutomatonKind>,
    pub(crate) rows: Option<u32>,
    pub(crate) columns: Option<u32>,
    pub(crate) steps_per_second: Option<u32>,
}

impl Settings {
    /// Merges overrides on top of the file configuration.
    ///
    /// The step rate is clamped into its supported range; a zero-sized grid is
    /// rejected rather than silently enlarged.
    pub(crate) fn resolve(
        config: &SandboxConfig,
        overrides: Overrides,
    ) -> Result<Self, ConfigError> {
        let rows = overrides.rows.unwrap_or(config.rows);
        let columns = overrides.columns.unwrap_or(config.columns);
        if rows == 0 || columns == 0 {
            return Err(ConfigError::EmptyGrid { rows, columns });
        }

        Ok(Self {
            automaton: overrides.automaton.unwrap_or(config.automaton),
            dimensions: Dimensions::new(rows, columns),
            rate: StepRate::new(overrides.steps_per_second.unwrap_or(config.steps_per_second)),
        })
    }
}
