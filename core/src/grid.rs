//! Dense toroidal cell grid shared by every automaton.

use crate::{CellCoord, CellState, Dimensions};

/// Column and row offsets of the eight Moore neighbours.
pub(crate) const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Fixed-size, row-major grid of cell states whose edges wrap around.
///
/// Readers treat out-of-range coordinates as absent and mutators ignore them,
/// so no coordinate can make the grid panic. Neighbour lookups instead wrap
/// their offsets modulo the grid size: the grid has no edges.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    dimensions: Dimensions,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates a grid of the given size with every cell in state zero.
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            cells: vec![CellState::ZERO; dimensions.cell_count()],
        }
    }

    /// Size of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// State of the cell, or `None` when the coordinate lies outside the grid.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<CellState> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Stores a state, returning whether the stored value changed.
    ///
    /// Out-of-range coordinates leave the grid untouched and report `false`.
    pub fn set(&mut self, cell: CellCoord, state: CellState) -> bool {
        let Some(slot) = self.index(cell).and_then(|index| self.cells.get_mut(index)) else {
            return false;
        };

        if *slot == state {
            return false;
        }

        *slot = state;
        true
    }

    /// Resets every cell to state zero.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::ZERO);
    }

    /// Maps a signed coordinate onto the torus.
    #[must_use]
    pub fn wrap(&self, column: i64, row: i64) -> CellCoord {
        let columns = i64::from(self.dimensions.columns());
        let rows = i64::from(self.dimensions.rows());
        // rem_euclid keeps the result in 0..len, which always fits in u32.
        CellCoord::new(
            column.rem_euclid(columns) as u32,
            row.rem_euclid(rows) as u32,
        )
    }

    /// Cell reached by moving `(dx, dy)` away from `cell`, wrapping at the edges.
    #[must_use]
    pub fn offset(&self, cell: CellCoord, dx: i32, dy: i32) -> CellCoord {
        self.wrap(
            i64::from(cell.column()) + i64::from(dx),
            i64::from(cell.row()) + i64::from(dy),
        )
    }

    /// Counts the wrapped Moore neighbours whose state satisfies `predicate`.
    ///
    /// Each of the eight offsets is counted independently, so on grids narrower
    /// than three cells the same cell may be visited more than once.
    #[must_use]
    pub fn neighbor_count<P>(&self, cell: CellCoord, mut predicate: P) -> u8
    where
        P: FnMut(CellState) -> bool,
    {
        let mut count = 0;
        for (dx, dy) in MOORE_OFFSETS {
            let neighbor = self.offset(cell, dx, dy);
            if self.get(neighbor).is_some_and(&mut predicate) {
                count += 1;
            }
        }
        count
    }

    /// Number of cells holding a non-zero state.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|state| !state.is_zero()).count()
    }

    /// Iterates over every cell coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.dimensions.columns();
        let rows = self.dimensions.rows();
        (0..rows).flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
    }

    /// Builds a grid of the same size whose cells are produced by `next`.
    ///
    /// `next` only ever observes `self`, which makes this the building block for
    /// synchronous updates: no freshly computed state is visible until the whole
    /// replacement grid exists.
    #[must_use]
    pub fn map_cells<F>(&self, mut next: F) -> Self
    where
        F: FnMut(CellCoord, CellState) -> CellState,
    {
        let cells = self
            .coords()
            .zip(self.cells.iter().copied())
            .map(|(cell, state)| next(cell, state))
            .collect();
        Self {
            dimensions: self.dimensions,
            cells,
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.dimensions.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.dimensions.columns()).ok()?;
        Some(row * width + column)
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use crate::{CellCoord, CellState, Dimensions};

    const ALIVE: CellState = CellState::new(1);

    #[test]
    fn out_of_range_reads_and_writes_are_ignored() {
        let mut grid = Grid::new(Dimensions::new(3, 4));
        assert_eq!(grid.get(CellCoord::new(4, 0)), None);
        assert_eq!(grid.get(CellCoord::new(0, 3)), None);
        assert!(!grid.set(CellCoord::new(9, 9), ALIVE));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn set_reports_whether_value_changed() {
        let mut grid = Grid::new(Dimensions::new(2, 2));
        assert!(grid.set(CellCoord::new(1, 1), ALIVE));
        assert!(!grid.set(CellCoord::new(1, 1), ALIVE));
        assert_eq!(grid.get(CellCoord::new(1, 1)), Some(ALIVE));
    }

    #[test]
    fn wrap_handles_negative_and_overflowing_offsets() {
        let grid = Grid::new(Dimensions::new(4, 5));
        assert_eq!(grid.wrap(-1, -1), CellCoord::new(4, 3));
        assert_eq!(grid.wrap(5, 4), CellCoord::new(0, 0));
        assert_eq!(grid.offset(CellCoord::new(0, 2), -1, 1), CellCoord::new(4, 3));
    }

    #[test]
    fn neighbor_count_wraps_across_both_axes() {
        let mut grid = Grid::new(Dimensions::new(5, 5));
        let _ = grid.set(CellCoord::new(4, 4), ALIVE);
        let _ = grid.set(CellCoord::new(4, 0), ALIVE);
        let _ = grid.set(CellCoord::new(0, 4), ALIVE);

        let count = grid.neighbor_count(CellCoord::new(0, 0), |state| state == ALIVE);
        assert_eq!(count, 3);
    }

    #[test]
    fn neighbor_count_excludes_centre_on_regular_grids() {
        let mut grid = Grid::new(Dimensions::new(3, 3));
        let _ = grid.set(CellCoord::new(1, 1), ALIVE);
        assert_eq!(grid.neighbor_count(CellCoord::new(1, 1), |state| state == ALIVE), 0);
    }

    #[test]
    fn single_cell_grid_sees_itself_through_every_offset() {
        let mut grid = Grid::new(Dimensions::new(1, 1));
        let _ = grid.set(CellCoord::new(0, 0), ALIVE);
        assert_eq!(grid.neighbor_count(CellCoord::new(0, 0), |state| state == ALIVE), 8);
    }

    #[test]
    fn clear_zeroes_all_cells() {
        let mut grid = Grid::new(Dimensions::new(3, 3));
        for cell in grid.coords().collect::<Vec<_>>() {
            let _ = grid.set(cell, ALIVE);
        }
        assert_eq!(grid.population(), 9);
        grid.clear();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn coords_are_row_major() {
        let grid = Grid::new(Dimensions::new(2, 3));
        let coords: Vec<_> = grid.coords().collect();
        assert_eq!(coords[0], CellCoord::new(0, 0));
        assert_eq!(coords[2], CellCoord::new(2, 0));
        assert_eq!(coords[3], CellCoord::new(0, 1));
        assert_eq!(coords.len(), 6);
    }
}
