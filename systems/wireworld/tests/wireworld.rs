use cellular_sandbox_core::{CellCoord, Dimensions, Grid, RuleEngine};
use cellular_sandbox_system_wireworld::{next_generation, WireCell, Wireworld};

fn paint(grid: &mut Grid, cells: &[(u32, u32)], cell: WireCell) {
    for &(column, row) in cells {
        let _ = grid.set(CellCoord::new(column, row), cell.state());
    }
}

fn cell_at(grid: &Grid, column: u32, row: u32) -> Option<WireCell> {
    grid.get(CellCoord::new(column, row))
        .and_then(WireCell::from_state)
}

#[test]
fn electron_travels_along_a_wire() {
    let mut grid = Grid::new(Dimensions::new(3, 8));
    paint(&mut grid, &[(3, 1), (4, 1), (5, 1), (6, 1)], WireCell::Wire);
    paint(&mut grid, &[(1, 1)], WireCell::Tail);
    paint(&mut grid, &[(2, 1)], WireCell::Head);

    let mut engine = Wireworld::new();
    engine.step(&mut grid);

    assert_eq!(cell_at(&grid, 1, 1), Some(WireCell::Wire));
    assert_eq!(cell_at(&grid, 2, 1), Some(WireCell::Tail));
    assert_eq!(cell_at(&grid, 3, 1), Some(WireCell::Head));
    assert_eq!(cell_at(&grid, 4, 1), Some(WireCell::Wire));

    for _ in 0..3 {
        engine.step(&mut grid);
    }
    assert_eq!(cell_at(&grid, 5, 1), Some(WireCell::Tail));
    assert_eq!(cell_at(&grid, 6, 1), Some(WireCell::Head));
    assert_eq!(cell_at(&grid, 0, 1), Some(WireCell::Empty));
}

#[test]
fn wire_stays_inert_with_three_neighbouring_heads() {
    let mut grid = Grid::new(Dimensions::new(5, 5));
    paint(&mut grid, &[(2, 2)], WireCell::Wire);
    paint(&mut grid, &[(1, 1), (2, 1), (3, 1)], WireCell::Head);

    let next = next_generation(&grid);

    assert_eq!(cell_at(&next, 2, 2), Some(WireCell::Wire));
    for column in 1..=3 {
        assert_eq!(cell_at(&next, column, 1), Some(WireCell::Tail));
    }
}

#[test]
fn wire_ignites_with_two_neighbouring_heads() {
    let mut grid = Grid::new(Dimensions::new(5, 5));
    paint(&mut grid, &[(2, 2)], WireCell::Wire);
    paint(&mut grid, &[(1, 1), (3, 3)], WireCell::Head);

    let next = next_generation(&grid);

    assert_eq!(cell_at(&next, 2, 2), Some(WireCell::Head));
}

#[test]
fn tails_never_ignite_in_the_generation_they_cool() {
    let mut grid = Grid::new(Dimensions::new(4, 4));
    paint(&mut grid, &[(1, 1)], WireCell::Tail);
    paint(&mut grid, &[(2, 1)], WireCell::Head);

    let next = next_generation(&grid);

    assert_eq!(cell_at(&next, 1, 1), Some(WireCell::Wire));
    assert_eq!(cell_at(&next, 2, 1), Some(WireCell::Tail));
}

#[test]
fn heads_reach_across_the_column_seam() {
    let mut grid = Grid::new(Dimensions::new(3, 5));
    paint(&mut grid, &[(0, 1)], WireCell::Head);
    paint(&mut grid, &[(4, 1)], WireCell::Wire);

    let next = next_generation(&grid);

    assert_eq!(cell_at(&next, 4, 1), Some(WireCell::Head));
    assert_eq!(cell_at(&next, 0, 1), Some(WireCell::Tail));
}

#[test]
fn heads_reach_across_the_row_seam() {
    let mut grid = Grid::new(Dimensions::new(5, 3));
    paint(&mut grid, &[(1, 4)], WireCell::Head);
    paint(&mut grid, &[(1, 0)], WireCell::Wire);

    let next = next_generation(&grid);

    assert_eq!(cell_at(&next, 1, 0), Some(WireCell::Head));
}

#[test]
fn electron_circulates_a_toroidal_loop() {
    let mut grid = Grid::new(Dimensions::new(3, 6));
    paint(&mut grid, &[(2, 1), (3, 1), (4, 1), (5, 1)], WireCell::Wire);
    paint(&mut grid, &[(0, 1)], WireCell::Tail);
    paint(&mut grid, &[(1, 1)], WireCell::Head);
    let initial = grid.clone();

    let mut engine = Wireworld::new();
    for step in 1..=6 {
        engine.step(&mut grid);
        let head_column = (1 + step) % 6;
        assert_eq!(
            cell_at(&grid, head_column, 1),
            Some(WireCell::Head),
            "head misplaced after {step} steps",
        );
    }
    assert_eq!(grid, initial);
}
