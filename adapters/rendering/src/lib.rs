#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Cellular Sandbox adapters.

use anyhow::Result as AnyResult;
use cellular_sandbox_core::{Ant, AutomatonKind, CellCoord, CellState, Dimensions, Grid, Heading};
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts the color channels back into byte RGB values.
    #[must_use]
    pub fn to_rgb_u8(self) -> [u8; 3] {
        [
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        ]
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Colors and glyphs used to draw a single automaton.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    cells: [Color; 4],
    glyphs: [char; 4],
    /// Color used when drawing grid lines.
    pub grid_line: Color,
    /// Color used to fill the window behind the grid.
    pub background: Color,
    /// Color of the Langton's Ant actor, if the automaton has one.
    pub actor: Option<Color>,
}

impl Palette {
    /// Palette for the provided automaton.
    #[must_use]
    pub const fn for_kind(kind: AutomatonKind) -> Self {
        let light = Color::from_rgb_u8(240, 240, 240);
        let dark = Color::from_rgb_u8(40, 40, 40);
        let unused = Color::from_rgb_u8(0, 0, 0);
        match kind {
            AutomatonKind::GameOfLife => Self {
                cells: [light, dark, unused, unused],
                glyphs: ['.', '#', '?', '?'],
                grid_line: Color::from_rgb_u8(200, 200, 200),
                background: light,
                actor: None,
            },
            AutomatonKind::LangtonsAnt => Self {
                cells: [light, dark, unused, unused],
                glyphs: ['.', '#', '?', '?'],
                grid_line: Color::from_rgb_u8(200, 200, 200),
                background: light,
                actor: Some(Color::from_rgb_u8(200, 50, 50)),
            },
            AutomatonKind::Wireworld => Self {
                cells: [
                    Color::from_rgb_u8(0, 0, 0),
                    Color::from_rgb_u8(50, 130, 255),
                    Color::from_rgb_u8(220, 40, 40),
                    Color::from_rgb_u8(220, 220, 40),
                ],
                glyphs: [' ', '@', '~', '='],
                grid_line: Color::from_rgb_u8(60, 60, 60),
                background: Color::from_rgb_u8(0, 0, 0),
                actor: None,
            },
        }
    }

    /// Fill color for a cell holding the provided state.
    ///
    /// States outside the alphabet fall back to the quiescent color.
    #[must_use]
    pub fn cell_color(&self, state: CellState) -> Color {
        self.cells
            .get(usize::from(state.get()))
            .copied()
            .unwrap_or(self.cells[0])
    }

    /// Text glyph for a cell holding the provided state.
    #[must_use]
    pub fn cell_glyph(&self, state: CellState) -> char {
        self.glyphs
            .get(usize::from(state.get()))
            .copied()
            .unwrap_or(self.glyphs[0])
    }
}

/// Glyph drawn for the ant, pointing in its heading.
#[must_use]
pub const fn actor_glyph(heading: Heading) -> char {
    match heading {
        Heading::Up => '^',
        Heading::Right => '>',
        Heading::Down => 'v',
        Heading::Left => '<',
    }
}

/// Translates a position in window pixels into the grid cell beneath it.
///
/// Returns `None` when the position lies outside the grid or the cell size
/// is not a positive finite value.
#[must_use]
pub fn cell_at(position: Vec2, cell_size: f32, dimensions: Dimensions) -> Option<CellCoord> {
    if !cell_size.is_finite() || cell_size <= f32::EPSILON || !position.is_finite() {
        return None;
    }
    if position.x < 0.0 || position.y < 0.0 {
        return None;
    }

    let scaled = position / cell_size;
    let column = scaled.x.floor();
    let row = scaled.y.floor();
    if column >= dimensions.columns() as f32 || row >= dimensions.rows() as f32 {
        return None;
    }

    Some(CellCoord::new(column as u32, row as u32))
}

/// Describes the on-screen layout of the cell grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Size of the grid in cells.
    pub dimensions: Dimensions,
    /// Side length of a single cell expressed in pixels.
    pub cell_size: f32,
}

impl GridPresentation {
    /// Default side length of a cell, matching the desktop sandbox.
    pub const DEFAULT_CELL_SIZE: f32 = 10.0;

    /// Creates a new grid layout descriptor.
    ///
    /// Returns an error when `cell_size` is not a positive finite value.
    pub fn new(
        dimensions: Dimensions,
        cell_size: f32,
    ) -> std::result::Result<Self, RenderingError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(RenderingError::InvalidCellSize { cell_size });
        }

        Ok(Self {
            dimensions,
            cell_size,
        })
    }

    /// Cell beneath a pointer position, if any.
    #[must_use]
    pub fn cell_at(&self, position: Vec2) -> Option<CellCoord> {
        cell_at(position, self.cell_size, self.dimensions)
    }
}

/// Immutable snapshot of a world generation ready to be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Automaton whose grid was captured.
    pub automaton: AutomatonKind,
    /// Generation counter at capture time.
    pub generation: u64,
    /// Whether playback was running at capture time.
    pub running: bool,
    /// Ant overlay drawn above the grid.
    pub ant: Option<Ant>,
    /// Colors and glyphs used for the captured automaton.
    pub palette: Palette,
    grid: Grid,
}

impl Scene {
    /// Captures the provided grid together with its automaton and actor.
    #[must_use]
    pub fn capture(
        automaton: AutomatonKind,
        grid: &Grid,
        ant: Option<Ant>,
        generation: u64,
    ) -> Self {
        Self {
            automaton,
            generation,
            running: false,
            ant,
            palette: Palette::for_kind(automaton),
            grid: grid.clone(),
        }
    }

    /// Size of the captured grid.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// Color to draw at the provided cell, with the ant drawn on top.
    #[must_use]
    pub fn color_at(&self, cell: CellCoord) -> Option<Color> {
        let state = self.grid.get(cell)?;
        match (self.ant_at(cell), self.palette.actor) {
            (Some(_), Some(actor)) => Some(actor),
            _ => Some(self.palette.cell_color(state)),
        }
    }

    /// Glyph to print at the provided cell, with the ant drawn on top.
    #[must_use]
    pub fn glyph_at(&self, cell: CellCoord) -> Option<char> {
        let state = self.grid.get(cell)?;
        Some(match self.ant_at(cell) {
            Some(ant) => actor_glyph(ant.heading),
            None => self.palette.cell_glyph(state),
        })
    }

    /// One-line summary of the captured state for window titles and footers.
    #[must_use]
    pub fn status_line(&self) -> String {
        let dimensions = self.dimensions();
        format!(
            "{} | {}x{} | generation {} | {}",
            self.automaton,
            dimensions.columns(),
            dimensions.rows(),
            self.generation,
            if self.running { "running" } else { "paused" },
        )
    }

    fn ant_at(&self, cell: CellCoord) -> Option<Ant> {
        self.ant.filter(|ant| ant.position == cell)
    }
}

/// Window level configuration handed to a backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title displayed by the backend.
    pub window_title: String,
    /// Grid layout used to draw the scene.
    pub grid: GridPresentation,
    /// Initial scene to draw.
    pub scene: Scene,
}

impl Presentation {
    /// Creates a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, grid: GridPresentation, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            grid,
            scene,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Cursor position in window pixels, when the pointer is over the window.
    pub cursor: Option<Vec2>,
    /// Whether the primary button went down on this frame.
    pub primary_pressed: bool,
    /// Whether the secondary button went down on this frame.
    pub secondary_pressed: bool,
    /// Whether the primary button is held.
    pub primary_held: bool,
    /// Whether the secondary button is held.
    pub secondary_held: bool,
    /// Whether the user asked to start or stop playback.
    pub toggle_playback: bool,
    /// Whether the user asked for a single generation.
    pub step_once: bool,
    /// Whether the user asked to clear the grid.
    pub clear: bool,
}

/// Decision returned by the scene update closure after each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep presenting frames.
    Continue,
    /// Present the current scene once more and stop.
    Exit,
}

/// Rendering backend capable of presenting Cellular Sandbox scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the update closure requests an exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and
    /// per-frame input captured by the adapter, and may replace the scene
    /// before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cells must have a positive on-screen size.
    InvalidCellSize {
        /// Provided size that failed validation.
        cell_size: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellSize { cell_size } => {
                write!(f, "cell_size must be positive (received {cell_size})")
            }
        }
    }
}

impl Error for RenderingError {}
