//! Constrained random generator for the secure room.
//!
//! This module produces a new valid random configuration from a target open-cell density. The
//! fill pass decides cells in row-major scan order and never revisits a decision, bounding local
//! corridor branching and straightness so the room stays securable, and every pass ends by
//! placing exactly one entry and one exit marker on the border.

use rand::Rng;

use crate::grid::{Cell, Grid};

/// Performs the first-cycle generation pass.
///
/// This function unconditionally resets every cell to [`Cell::Closed`] and then runs the same
/// fill-and-place pass as [`regenerate`]. The steady repeating cycle uses [`regenerate`] alone,
/// which instead carries the previous border markers through the fill before erasing them.
pub fn generate(grid: &mut Grid, density: f64, rng: &mut impl Rng) {
    grid.fill(Cell::Closed);
    regenerate(grid, density, rng);
}

/// Regenerates the room into a new random configuration.
///
/// This function runs the row-major fill pass, erases the previous generation's entry and exit
/// markers, and places fresh ones. For each cell a uniform value is drawn; the cell opens iff
/// the draw does not exceed `density` and `is_valid_open_cell_placement` holds against the
/// cells already decided earlier in scan order. Decisions are never revisited, which makes the
/// result order-dependent: top-to-bottom, left-to-right.
pub fn regenerate(grid: &mut Grid, density: f64, rng: &mut impl Rng) {
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if grid.is_border(row, col)
                && matches!(grid.get(row, col), Cell::Entry | Cell::Exit)
            {
                continue;
            }

            let draw: f64 = rng.random();
            if draw <= density && is_valid_open_cell_placement(grid, row, col) {
                grid.set(row, col, Cell::Open);
            } else {
                grid.set(row, col, Cell::Closed);
            }
        }
    }

    clear_previous_markers(grid);
    place_entry_exit_points(grid, rng);
}

/// Checks whether opening the cell at the given location is valid.
///
/// Placement is rejected when the cell already holds a border marker, when more than one of its
/// four direct neighbors is already open, when both opposite neighbors on any straight line
/// through the cell (vertical, horizontal, or either diagonal) are open, or when the cells one
/// and two steps away in the same axis-aligned direction are both open. These rules bound local
/// corridor branching and straightness so the room has no wide-open runs.
pub(crate) fn is_valid_open_cell_placement(grid: &Grid, row: usize, col: usize) -> bool {
    if matches!(grid.get(row, col), Cell::Entry | Cell::Exit) {
        return false;
    }

    if count_adjacent_open_cells(grid, row, col) > 1 {
        return false;
    }

    let up = row.checked_sub(1);
    let down = Some(row + 1);
    let left = col.checked_sub(1);
    let right = Some(col + 1);

    // Three collinear open cells through the candidate, straight or diagonal.
    if (open_at(grid, up, Some(col)) && open_at(grid, down, Some(col)))
        || (open_at(grid, Some(row), left) && open_at(grid, Some(row), right))
        || (open_at(grid, up, left) && open_at(grid, down, right))
        || (open_at(grid, up, right) && open_at(grid, down, left))
    {
        return false;
    }

    // Two consecutive open cells two steps away in any axis-aligned direction.
    if (open_at(grid, row.checked_sub(2), Some(col)) && open_at(grid, up, Some(col)))
        || (open_at(grid, Some(row + 2), Some(col)) && open_at(grid, down, Some(col)))
        || (open_at(grid, Some(row), col.checked_sub(2)) && open_at(grid, Some(row), left))
        || (open_at(grid, Some(row), Some(col + 2)) && open_at(grid, Some(row), right))
    {
        return false;
    }

    true
}

/// Counts the open cells among the four direct neighbors of the given cell.
fn count_adjacent_open_cells(grid: &Grid, row: usize, col: usize) -> usize {
    let neighbors = [
        (row.checked_sub(1), Some(col)),
        (Some(row + 1), Some(col)),
        (Some(row), col.checked_sub(1)),
        (Some(row), Some(col + 1)),
    ];

    neighbors
        .into_iter()
        .filter(|&(neighbor_row, neighbor_col)| open_at(grid, neighbor_row, neighbor_col))
        .count()
}

/// Reports whether the cell at the given optional coordinates exists and is open.
///
/// Underflowed and out-of-range coordinates count as not open, mirroring the bounds guards on
/// every neighbor check in the placement rules.
fn open_at(grid: &Grid, row: Option<usize>, col: Option<usize>) -> bool {
    match (row, col) {
        (Some(row), Some(col)) if row < grid.rows() && col < grid.cols() => {
            grid.get(row, col) == Cell::Open
        }
        _ => false,
    }
}

/// Erases the previous generation's border markers.
///
/// The fill pass skips cells holding [`Cell::Entry`] or [`Cell::Exit`] so the markers survive
/// while the scan is still running; this second phase closes them, only if found, and only then
/// are fresh positions drawn.
fn clear_previous_markers(grid: &mut Grid) {
    let mut entry = None;
    let mut exit = None;
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            match grid.get(row, col) {
                Cell::Entry => entry = Some((row, col)),
                Cell::Exit => exit = Some((row, col)),
                _ => {}
            }
        }
    }

    if let Some((row, col)) = entry {
        grid.set(row, col, Cell::Closed);
    }
    if let Some((row, col)) = exit {
        grid.set(row, col, Cell::Closed);
    }
}

/// Places fresh entry and exit markers on the border.
///
/// Two distinct perimeter indices are drawn uniformly, the second by rejection sampling: redraw
/// until it differs from the first. The border cells are then walked in the same row-major order
/// used to count the perimeter, writing the markers at the matching indices.
fn place_entry_exit_points(grid: &mut Grid, rng: &mut impl Rng) {
    let perimeter = grid.perimeter_len();
    let entry_position = rng.random_range(0..perimeter);
    let mut exit_position = rng.random_range(0..perimeter);
    while exit_position == entry_position {
        exit_position = rng.random_range(0..perimeter);
    }

    let border: Vec<(usize, usize)> = grid.border_cells().collect();
    for (counter, (row, col)) in border.into_iter().enumerate() {
        if counter == entry_position {
            grid.set(row, col, Cell::Entry);
        } else if counter == exit_position {
            grid.set(row, col, Cell::Exit);
        }
    }
}
