#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Cellular Sandbox in a terminal.

mod config;
mod input;
mod seed;
mod session;
mod terminal;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use cellular_sandbox_core::{AutomatonKind, Command, SANDBOX_TITLE};
use cellular_sandbox_rendering::{GridPresentation, Presentation, RenderingBackend};
use cellular_sandbox_world::query;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{
    config::{Overrides, SandboxConfig, Settings},
    seed::CellSpec,
    session::Session,
    terminal::{FrameStyle, Pacing, TerminalBackend},
};

/// Spacing between printed frames when running against the wall clock.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Automaton names accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AutomatonArg {
    /// Conway's Game of Life.
    Life,
    /// Langton's Ant.
    LangtonsAnt,
    /// Wireworld.
    Wireworld,
}

impl From<AutomatonArg> for AutomatonKind {
    fn from(value: AutomatonArg) -> Self {
        match value {
            AutomatonArg::Life => Self::GameOfLife,
            AutomatonArg::LangtonsAnt => Self::LangtonsAnt,
            AutomatonArg::Wireworld => Self::Wireworld,
        }
    }
}

/// Run a cellular automaton on a toroidal grid and print it to the terminal.
#[derive(Debug, Parser)]
#[command(name = "cellular-sandbox", version)]
struct Args {
    /// TOML file providing automaton, rows, columns and steps_per_second.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Automaton to run.
    #[arg(long, value_enum)]
    automaton: Option<AutomatonArg>,

    /// Number of grid rows.
    #[arg(long)]
    rows: Option<u32>,

    /// Number of grid columns.
    #[arg(long, visible_alias = "cols")]
    columns: Option<u32>,

    /// Generations per second, clamped to 1..=200.
    #[arg(long)]
    rate: Option<u32>,

    /// Generations to run before exiting; 0 with --paced runs until interrupted.
    #[arg(long, default_value_t = 100)]
    generations: u64,

    /// Cell to set before the run, as `x,y` or `x,y,state`. Repeatable.
    #[arg(long = "cell", value_name = "X,Y[,STATE]")]
    cells: Vec<CellSpec>,

    /// Fill the grid with a random soup of the given density.
    #[arg(long, value_name = "DENSITY", value_parser = seed::parse_density)]
    random: Option<f64>,

    /// Seed for the random soup.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Step at the configured rate against the wall clock, printing every frame.
    #[arg(long)]
    paced: bool,

    /// How cells are printed.
    #[arg(long, value_enum, default_value_t = FrameStyle::Ascii)]
    style: FrameStyle,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            automaton: self.automaton.map(AutomatonKind::from),
            rows: self.rows,
            columns: self.columns,
            steps_per_second: self.rate,
        }
    }

    fn target(&self) -> Option<u64> {
        if self.paced && self.generations == 0 {
            None
        } else {
            Some(self.generations)
        }
    }
}

/// Installs a formatting subscriber filtered by the `LOG_LEVEL` variable.
fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

/// Entry point for the Cellular Sandbox command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = match &args.config {
        Some(path) => SandboxConfig::load(path)
            .with_context(|| format!("failed to load sandbox configuration {}", path.display()))?,
        None => SandboxConfig::default(),
    };
    let settings =
        Settings::resolve(&config, args.overrides()).context("invalid sandbox settings")?;
    info!(
        automaton = %settings.automaton,
        rows = settings.dimensions.rows(),
        columns = settings.dimensions.columns(),
        rate = settings.rate.get(),
        paced = args.paced,
        "starting sandbox"
    );

    let mut session = Session::new(&settings, args.target());
    if let Some(density) = args.random {
        let soup = seed::random_soup(settings.automaton, settings.dimensions, density, args.seed);
        info!(cells = soup.len(), seed = args.seed, "seeding random soup");
        for command in soup {
            session.submit(command);
        }
    }
    for spec in &args.cells {
        session.submit(spec.command());
    }
    session.submit(Command::SetPlayback { running: true });

    let layout = GridPresentation::new(settings.dimensions, GridPresentation::DEFAULT_CELL_SIZE)?;
    let presentation = Presentation::new(SANDBOX_TITLE, layout, session.scene());
    let pacing = if args.paced {
        Pacing::RealTime {
            frame: FRAME_INTERVAL,
        }
    } else {
        Pacing::Headless {
            dt: settings.rate.interval(),
        }
    };

    let backend = TerminalBackend::new(io::stdout().lock(), args.style, pacing);
    backend.run(presentation, |dt, frame_input, scene| {
        let control = session.frame(dt, frame_input, &layout);
        *scene = session.scene();
        control
    })?;

    let world = session.world();
    info!(
        generation = query::generation(world),
        population = query::population(world),
        "sandbox finished"
    );
    Ok(())
}
