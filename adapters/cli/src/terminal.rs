use std::{
    io::Write,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result as AnyResult};
use cellular_sandbox_core::CellCoord;
use cellular_sandbox_rendering::{
    Color, FrameControl, FrameInput, Presentation, RenderingBackend, Scene,
};
use clap::ValueEnum;

const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";
const RESET_STYLE: &str = "\x1b[0m";
const GRID_LINE: &str = "\u{258f} ";

/// How cells are printed to the terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum FrameStyle {
    /// One glyph per cell.
    #[default]
    Ascii,
    /// Two truecolour-filled spaces per cell.
    Ansi,
}

/// Clock that feeds the scene update closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pacing {
    /// Simulated time: every frame advances by `dt` and only the last frame is printed.
    Headless {
        /// Time credited to each frame.
        dt: Duration,
    },
    /// Wall-clock time: frames are printed as they happen, roughly `frame` apart.
    RealTime {
        /// Target spacing between printed frames.
        frame: Duration,
    },
}

/// Rendering backend that prints scenes to a terminal or any writer.
#[derive(Debug)]
pub(crate) struct TerminalBackend<W> {
    out: W,
    style: FrameStyle,
    pacing: Pacing,
}

impl<W: Write> TerminalBackend<W> {
    /// Creates a backend writing to `out`.
    pub(crate) fn new(out: W, style: FrameStyle, pacing: Pacing) -> Self {
        Self { out, style, pacing }
    }

    fn draw(&mut self, title: &str, scene: &Scene) -> AnyResult<()> {
        let frame = render(scene, self.style);
        write!(self.out, "{title}\n{frame}").context("failed to write frame")?;
        self.out.flush().context("failed to flush terminal output")
    }
}

impl<W: Write> RenderingBackend for TerminalBackend<W> {
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl,
    {
        let title = presentation.window_title;
        let mut scene = presentation.scene;

        match self.pacing {
            Pacing::Headless { dt } => {
                while update_scene(dt, FrameInput::default(), &mut scene) == FrameControl::Continue
                {
                }
                self.draw(&title, &scene)
            }
            Pacing::RealTime { frame } => {
                let mut last = Instant::now();
                loop {
                    let now = Instant::now();
                    let control = update_scene(now - last, FrameInput::default(), &mut scene);
                    last = now;

                    let clear = clear_sequence(&scene, self.style);
                    write!(self.out, "{clear}").context("failed to clear terminal")?;
                    self.draw(&title, &scene)?;
                    if control == FrameControl::Exit {
                        return Ok(());
                    }
                    thread::sleep(frame.saturating_sub(now.elapsed()));
                }
            }
        }
    }
}

/// Escape sequence that wipes the terminal before a frame.
///
/// The ANSI style clears to the automaton's background color.
pub(crate) fn clear_sequence(scene: &Scene, style: FrameStyle) -> String {
    match style {
        FrameStyle::Ascii => CLEAR_SCREEN.to_owned(),
        FrameStyle::Ansi => format!("{}{CLEAR_SCREEN}", ansi_color(48, scene.palette.background)),
    }
}

fn ansi_color(layer: u8, color: Color) -> String {
    let [red, green, blue] = color.to_rgb_u8();
    format!("\x1b[{layer};2;{red};{green};{blue}m")
}

/// Formats a scene as text followed by its status line.
///
/// ANSI cells are two columns wide: a left grid line drawn in the palette's
/// line color, then the cell fill.
pub(crate) fn render(scene: &Scene, style: FrameStyle) -> String {
    let dimensions = scene.dimensions();
    let mut frame = String::new();
    for row in 0..dimensions.rows() {
        for column in 0..dimensions.columns() {
            let cell = CellCoord::new(column, row);
            match style {
                FrameStyle::Ascii => {
                    frame.push(scene.glyph_at(cell).unwrap_or(' '));
                }
                FrameStyle::Ansi => {
                    if let Some(color) = scene.color_at(cell) {
                        frame.push_str(&ansi_color(48, color));
                        frame.push_str(&ansi_color(38, scene.palette.grid_line));
                        frame.push_str(GRID_LINE);
                    }
                }
            }
        }
        if style == FrameStyle::Ansi {
            frame.push_str(RESET_STYLE);
        }
        frame.push('\n');
    }
    frame.push_str(&scene.status_line());
    frame.push('\n');
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellular_sandbox_core::{Ant, AutomatonKind, CellState, Dimensions, Grid, Heading};
    use cellular_sandbox_rendering::GridPresentation;

    fn wire_scene() -> Scene {
        let mut grid = Grid::new(Dimensions::new(2, 3));
        let _ = grid.set(CellCoord::new(0, 0), CellState::new(1));
        let _ = grid.set(CellCoord::new(1, 0), CellState::new(2));
        let _ = grid.set(CellCoord::new(2, 0), CellState::new(3));
        Scene::capture(AutomatonKind::Wireworld, &grid, None, 4)
    }

    #[test]
    fn ascii_frames_print_one_glyph_per_cell() {
        assert_eq!(
            render(&wire_scene(), FrameStyle::Ascii),
            "@~=\n   \nWireworld | 3x2 | generation 4 | paused\n"
        );
    }

    #[test]
    fn ansi_frames_use_palette_colors() {
        let frame = render(&wire_scene(), FrameStyle::Ansi);
        let first_row = frame.lines().next().expect("grid row");

        assert!(first_row.starts_with("\x1b[48;2;50;130;255m\x1b[38;2;60;60;60m\u{258f} "));
        assert!(first_row.contains("\x1b[48;2;220;220;40m\x1b[38;2;60;60;60m\u{258f} "));
        assert!(first_row.ends_with(RESET_STYLE));
    }

    #[test]
    fn ansi_clear_fills_the_palette_background() {
        assert_eq!(
            clear_sequence(&wire_scene(), FrameStyle::Ansi),
            "\x1b[48;2;0;0;0m\x1b[H\x1b[2J"
        );

        let life = Scene::capture(
            AutomatonKind::GameOfLife,
            &Grid::new(Dimensions::new(1, 1)),
            None,
            0,
        );
        assert_eq!(
            clear_sequence(&life, FrameStyle::Ansi),
            "\x1b[48;2;240;240;240m\x1b[H\x1b[2J"
        );
        assert_eq!(clear_sequence(&life, FrameStyle::Ascii), CLEAR_SCREEN);
    }

    #[test]
    fn headless_backend_prints_only_the_final_frame() {
        let grid = Grid::new(Dimensions::new(1, 3));
        let ant = Ant {
            position: CellCoord::new(1, 0),
            heading: Heading::Up,
        };
        let scene = Scene::capture(AutomatonKind::LangtonsAnt, &grid, Some(ant), 0);
        let layout = GridPresentation::new(grid.dimensions(), 5.0)
            .expect("valid layout");
        let presentation = Presentation::new("sandbox", layout, scene);

        let mut out = Vec::new();
        let mut frames = 0;
        let backend = TerminalBackend::new(
            &mut out,
            FrameStyle::Ascii,
            Pacing::Headless {
                dt: Duration::from_millis(10),
            },
        );
        backend
            .run(presentation, |dt, _, scene| {
                assert_eq!(dt, Duration::from_millis(10));
                frames += 1;
                scene.generation = frames;
                if frames == 3 {
                    FrameControl::Exit
                } else {
                    FrameControl::Continue
                }
            })
            .expect("writing to memory succeeds");

        let printed = String::from_utf8(out).expect("utf-8 output");
        assert_eq!(
            printed,
            "sandbox\n.^.\nLangton's Ant | 3x1 | generation 3 | paused\n"
        );
    }
}
