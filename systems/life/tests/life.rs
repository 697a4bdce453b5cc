use cellular_sandbox_core::{CellCoord, CellState, Dimensions, Grid, RuleEngine};
use cellular_sandbox_system_life::{next_generation, Life, LifeCell};

fn grid_with(rows: u32, columns: u32, alive: &[(u32, u32)]) -> Grid {
    let mut grid = Grid::new(Dimensions::new(rows, columns));
    for &(column, row) in alive {
        let _ = grid.set(CellCoord::new(column, row), LifeCell::Alive.state());
    }
    grid
}

fn alive_cells(grid: &Grid) -> Vec<(u32, u32)> {
    grid.coords()
        .filter(|cell| grid.get(*cell) == Some(LifeCell::Alive.state()))
        .map(|cell| (cell.column(), cell.row()))
        .collect()
}

#[test]
fn block_is_a_still_life() {
    let block = grid_with(6, 6, &[(2, 2), (3, 2), (2, 3), (3, 3)]);
    let mut grid = block.clone();
    let mut life = Life::new();

    for generation in 0..16 {
        life.step(&mut grid);
        assert_eq!(grid, block, "block changed at generation {generation}");
    }
}

#[test]
fn blinker_oscillates_with_period_two() {
    let horizontal = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
    let mut life = Life::new();
    let mut grid = horizontal.clone();

    life.step(&mut grid);
    assert_eq!(alive_cells(&grid), vec![(2, 1), (2, 2), (2, 3)]);

    life.step(&mut grid);
    assert_eq!(grid, horizontal);
}

/// Updates cells in row-major order, letting later cells observe earlier writes.
fn naive_in_place_step(grid: &mut Grid) {
    let alive = LifeCell::Alive.state();
    for cell in grid.coords().collect::<Vec<_>>() {
        let neighbors = grid.neighbor_count(cell, |state| state == alive);
        let current = LifeCell::from_state(grid.get(cell).unwrap_or(CellState::ZERO))
            .unwrap_or(LifeCell::Dead);
        let _ = grid.set(cell, current.next(neighbors).state());
    }
}

#[test]
fn update_reads_only_the_previous_generation() {
    let blinker = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);

    let mut naive = blinker.clone();
    naive_in_place_step(&mut naive);
    let synchronous = next_generation(&blinker);

    assert_ne!(
        naive, synchronous,
        "in-place updates must diverge on order-sensitive grids",
    );
    assert_eq!(alive_cells(&synchronous), vec![(2, 1), (2, 2), (2, 3)]);
}

#[test]
fn next_generation_leaves_input_untouched() {
    let blinker = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
    let snapshot = blinker.clone();
    let _next = next_generation(&blinker);
    assert_eq!(blinker, snapshot);
}

#[test]
fn neighbours_wrap_across_columns() {
    // A horizontal blinker straddling the left and right edges.
    let grid = grid_with(5, 5, &[(4, 2), (0, 2), (1, 2)]);
    let next = next_generation(&grid);
    assert_eq!(alive_cells(&next), vec![(0, 1), (0, 2), (0, 3)]);
}

#[test]
fn neighbours_wrap_across_rows() {
    let grid = grid_with(5, 5, &[(2, 4), (2, 0), (2, 1)]);
    let next = next_generation(&grid);
    assert_eq!(alive_cells(&next), vec![(1, 0), (2, 0), (3, 0)]);
}

#[test]
fn glider_returns_home_after_circling_the_torus() {
    let glider = grid_with(8, 8, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
    let mut grid = glider.clone();
    let mut life = Life::new();

    // One diagonal cell every four generations; eight cells to come back.
    for _ in 0..32 {
        life.step(&mut grid);
        assert_eq!(grid.population(), 5);
    }
    assert_eq!(grid, glider);
}

#[test]
fn lonely_cells_die() {
    let mut grid = grid_with(4, 4, &[(1, 1)]);
    Life::new().step(&mut grid);
    assert_eq!(grid.population(), 0);
}
