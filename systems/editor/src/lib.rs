#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure editing system that turns pointer gestures into cell edit commands.
//!
//! All interaction state (whether a stroke is in progress, which state it
//! paints, whether it erases) lives here rather than in the world, which only
//! ever sees `Command::SetCell`.

use cellular_sandbox_core::{AutomatonKind, CellCoord, CellState, Command, Event};

/// Pointer button that started or continues a stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Main button, usually the left mouse button.
    Primary,
    /// Alternate button, usually the right mouse button.
    Secondary,
}

/// Pointer interaction already translated into grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerGesture {
    /// A button went down over a cell.
    Press {
        /// Cell under the pointer.
        cell: CellCoord,
        /// Button that was pressed.
        button: PointerButton,
    },
    /// The pointer moved over a cell while a button is held.
    Drag {
        /// Cell under the pointer.
        cell: CellCoord,
        /// Button held during the move.
        button: PointerButton,
    },
    /// All buttons were released.
    Release,
}

/// Cycles a Wireworld cell backwards through its alphabet.
///
/// Pressing repeatedly walks empty, wire, tail, head and back to empty.
#[must_use]
pub const fn wireworld_cycle(state: CellState) -> CellState {
    CellState::new((state.get() % 4 + 3) % 4)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stroke {
    Idle,
    Painting(CellState),
    Erasing,
}

/// Editing system holding the per-automaton drawing conventions.
#[derive(Clone, Debug)]
pub struct Editor {
    automaton: AutomatonKind,
    stroke: Stroke,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(AutomatonKind::GameOfLife)
    }
}

impl Editor {
    /// Creates an idle editor for the provided automaton.
    #[must_use]
    pub const fn new(automaton: AutomatonKind) -> Self {
        Self {
            automaton,
            stroke: Stroke::Idle,
        }
    }

    /// Reports whether a stroke is in progress.
    #[must_use]
    pub const fn is_drawing(&self) -> bool {
        !matches!(self.stroke, Stroke::Idle)
    }

    /// Consumes world events and pointer gestures to emit edit commands.
    ///
    /// The `cell_at` closure should mirror the world's `cell` query so the
    /// system can read the state under the pointer; it returns `None` for
    /// coordinates outside the grid. Every in-bounds cell the stroke touches
    /// yields a `SetCell`, even when it already holds the stroke's state, since
    /// the world may step before the edit is applied.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        gestures: &[PointerGesture],
        mut cell_at: F,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(CellCoord) -> Option<CellState>,
    {
        for event in events {
            if let Event::AutomatonSelected { kind, .. } = event {
                self.automaton = *kind;
                self.stroke = Stroke::Idle;
            }
        }

        for gesture in gestures {
            match *gesture {
                PointerGesture::Press { cell, button } => {
                    let Some(current) = cell_at(cell) else {
                        continue;
                    };
                    self.stroke = self.begin_stroke(current, button);
                    if let Some(state) = self.stroke_state() {
                        out.push(Command::SetCell { cell, state });
                    }
                }
                PointerGesture::Drag { cell, button } => {
                    if !self.paints_while_held(button) {
                        continue;
                    }
                    let Some(state) = self.stroke_state() else {
                        continue;
                    };
                    if cell_at(cell).is_some() {
                        out.push(Command::SetCell { cell, state });
                    }
                }
                PointerGesture::Release => {
                    self.stroke = Stroke::Idle;
                }
            }
        }
    }

    fn begin_stroke(&self, current: CellState, button: PointerButton) -> Stroke {
        match self.automaton {
            AutomatonKind::GameOfLife => {
                if current.is_zero() {
                    Stroke::Painting(CellState::new(1))
                } else {
                    Stroke::Painting(CellState::ZERO)
                }
            }
            AutomatonKind::Wireworld => match button {
                PointerButton::Primary => Stroke::Painting(wireworld_cycle(current)),
                PointerButton::Secondary => Stroke::Erasing,
            },
            AutomatonKind::LangtonsAnt => Stroke::Idle,
        }
    }

    fn paints_while_held(&self, button: PointerButton) -> bool {
        match self.automaton {
            AutomatonKind::GameOfLife => button == PointerButton::Primary,
            AutomatonKind::Wireworld => true,
            AutomatonKind::LangtonsAnt => false,
        }
    }

    fn stroke_state(&self) -> Option<CellState> {
        match self.stroke {
            Stroke::Idle => None,
            Stroke::Painting(state) => Some(state),
            Stroke::Erasing => Some(CellState::ZERO),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::wireworld_cycle;
    use cellular_sandbox_core::CellState;

    #[test]
    fn cycle_walks_backwards_through_the_alphabet() {
        let order: Vec<u8> = std::iter::successors(Some(CellState::ZERO), |state| {
            Some(wireworld_cycle(*state))
        })
        .take(5)
        .map(|state| state.get())
        .collect();
        assert_eq!(order, vec![0, 3, 2, 1, 0]);
    }
}
