//! Depth-first search for a traversable entry-to-exit path.
//!
//! This module locates the entry marker on the border and performs a single depth-first
//! traversal over the current room, marking explored cells in place and reporting the first
//! discovered entry-to-exit path, if any. The traversal runs on an explicit frame stack instead
//! of recursion, so its depth is bounded by heap memory rather than the call stack while keeping
//! the fixed neighbor order and short-circuiting of the recursive formulation.

use crate::grid::{Cell, Grid};

/// Fixed neighbor visit order: up, down, left, right.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Outcome of one search pass.
///
/// "No path found" and "entry point not found" are normal, expected search outcomes reported
/// through the same channel as a successful result; they are not errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchReport {
    /// A connected corridor of open cells exists from the entry cell to the exit cell.
    Found {
        /// Coordinates of the entry cell the traversal started from.
        start: (usize, usize),
        /// Coordinates of the exit cell the traversal reached.
        end: (usize, usize),
    },
    /// The entry marker was located but no traversable corridor reaches the exit.
    NoPath,
    /// No entry marker exists on the border; distinct from "entry found but no path exists".
    EntryNotFound,
}

impl SearchReport {
    /// Formats the report with the simulation's report wording.
    pub fn describe(&self) -> String {
        match *self {
            Self::Found { start, end } => format!(
                "Partial path found from ({}, {}) to ({}, {})",
                start.0, start.1, end.0, end.1
            ),
            Self::NoPath => "No path found.".to_owned(),
            Self::EntryNotFound => "Entry point not found.".to_owned(),
        }
    }
}

/// One explicit depth-first frame: a cell and the next direction to try from it.
struct Frame {
    /// Row of the cell this frame explores from.
    row: usize,
    /// Column of the cell this frame explores from.
    col: usize,
    /// Index into [`DIRECTIONS`] of the next neighbor to try.
    next_direction: usize,
}

impl Frame {
    /// Creates a frame that has not tried any direction yet.
    const fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            next_direction: 0,
        }
    }
}

/// Searches the room for a traversable entry-to-exit path.
///
/// The entry cell is located by scanning the border in row-major order for the first
/// [`Cell::Entry`] marker. From there the traversal explores neighbors in the fixed
/// up/down/left/right order, short-circuiting on the first direction that reaches the exit.
/// Every explored cell, the entry included, is destructively marked [`Cell::Visited`], which
/// both prevents revisits and leaves the exploration visible to the next render; on success the
/// cells still on the stack, the discovered corridor, are re-marked [`Cell::PathMark`]. The next
/// generation pass overwrites both markings.
pub fn search(grid: &mut Grid) -> SearchReport {
    let Some((entry_row, entry_col)) = find_entry(grid) else {
        return SearchReport::EntryNotFound;
    };

    grid.set(entry_row, entry_col, Cell::Visited);
    let mut stack = vec![Frame::new(entry_row, entry_col)];

    while let Some(frame) = stack.last_mut() {
        let Some(&(row_step, col_step)) = DIRECTIONS.get(frame.next_direction) else {
            // Every direction from this cell is exhausted; backtrack.
            let _ = stack.pop();
            continue;
        };
        frame.next_direction += 1;

        let Some(row) = frame.row.checked_add_signed(row_step) else {
            continue;
        };
        let Some(col) = frame.col.checked_add_signed(col_step) else {
            continue;
        };
        if row >= grid.rows() || col >= grid.cols() {
            continue;
        }

        match grid.get(row, col) {
            Cell::Exit => {
                // The stack bottom is the entry cell, so the reported start is always the
                // entry's own coordinates.
                for corridor in &stack {
                    grid.set(corridor.row, corridor.col, Cell::PathMark);
                }

                return SearchReport::Found {
                    start: (entry_row, entry_col),
                    end: (row, col),
                };
            }
            Cell::Closed | Cell::Visited => {}
            _ => {
                grid.set(row, col, Cell::Visited);
                stack.push(Frame::new(row, col));
            }
        }
    }

    SearchReport::NoPath
}

/// Locates the entry cell by scanning the border in row-major order.
///
/// The first match in scan order wins if, abnormally, more than one marker exists.
fn find_entry(grid: &Grid) -> Option<(usize, usize)> {
    grid.border_cells()
        .find(|&(row, col)| grid.get(row, col) == Cell::Entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a grid from the simulation's glyph notation.
    fn grid_from(rows: &[&str]) -> Grid {
        let cols = rows.first().expect("at least one row").len();
        let mut grid = Grid::new(rows.len(), cols);
        for (row, line) in rows.iter().enumerate() {
            for (col, glyph) in line.chars().enumerate() {
                let cell = match glyph {
                    'S' => Cell::Entry,
                    'E' => Cell::Exit,
                    ' ' => Cell::Open,
                    'X' => Cell::Closed,
                    '.' => Cell::Visited,
                    'P' => Cell::PathMark,
                    other => panic!("unknown glyph {other}"),
                };
                grid.set(row, col, cell);
            }
        }

        grid
    }

    #[test]
    fn test_search_finds_straight_corridor() {
        let mut grid = grid_from(&[
            "XXSXX", //
            "XX XX",
            "XX XX",
            "XX XX",
            "XXEXX",
        ]);

        let report = search(&mut grid);

        assert_eq!(
            report,
            SearchReport::Found {
                start: (0, 2),
                end: (4, 2),
            }
        );
        // The discovered corridor carries path marks; the exit marker is untouched.
        for row in 0..4 {
            assert_eq!(grid.get(row, 2), Cell::PathMark);
        }
        assert_eq!(grid.get(4, 2), Cell::Exit);
    }

    #[test]
    fn test_search_without_entry_marker() {
        let mut grid = grid_from(&[
            "XXXXX", //
            "X   X",
            "XXXXE",
        ]);

        assert_eq!(search(&mut grid), SearchReport::EntryNotFound);
    }

    #[test]
    fn test_search_reports_no_path() {
        let mut grid = grid_from(&[
            "XSXXX", //
            "X XXX",
            "X XXX",
            "XXXXE",
        ]);

        let report = search(&mut grid);

        assert_eq!(report, SearchReport::NoPath);
        // The reachable cells, the entry included, were destructively marked.
        assert_eq!(grid.get(0, 1), Cell::Visited);
        assert_eq!(grid.get(1, 1), Cell::Visited);
        assert_eq!(grid.get(2, 1), Cell::Visited);
        assert_eq!(grid.get(3, 4), Cell::Exit);
    }

    #[test]
    fn test_search_with_adjacent_entry_and_exit() {
        // Entry and exit sharing a border edge need no open traversal cell between them.
        let mut grid = grid_from(&[
            "XSEX", //
            "XXXX",
            "XXXX",
        ]);

        assert_eq!(
            search(&mut grid),
            SearchReport::Found {
                start: (0, 1),
                end: (0, 2),
            }
        );
    }

    #[test]
    fn test_search_consumes_entry_marker() {
        let mut grid = grid_from(&[
            "XSXX", //
            "XXXX",
            "XXEX",
        ]);

        assert_eq!(search(&mut grid), SearchReport::NoPath);
        // The first pass marked the entry visited, so a repeat before the next generation pass
        // cannot locate it.
        assert_eq!(search(&mut grid), SearchReport::EntryNotFound);
    }

    #[test]
    fn test_search_prefers_down_before_right() {
        // The side branches reach nothing; the down branch reaches the exit first, so the
        // short-circuit leaves the branch cells untouched.
        let mut grid = grid_from(&[
            "XXSXX", //
            "XX XX",
            "X   X",
            "XX XX",
            "XXEXX",
        ]);

        let report = search(&mut grid);

        assert_eq!(
            report,
            SearchReport::Found {
                start: (0, 2),
                end: (4, 2),
            }
        );
        assert_eq!(grid.get(2, 1), Cell::Open, "left branch never explored");
        assert_eq!(grid.get(2, 3), Cell::Open, "right branch never explored");
    }

    #[test]
    fn test_search_visits_each_cell_at_most_once() {
        // A fully open interior with an unreachable exit forces exhaustive exploration; every
        // reachable cell ends visited exactly once and the traversal terminates.
        let mut grid = grid_from(&[
            "XSXXX", //
            "X   X",
            "X   X",
            "X   X",
            "XXXXX",
        ]);
        grid.set(4, 4, Cell::Exit);

        assert_eq!(search(&mut grid), SearchReport::NoPath);
        let mut visited = 0;
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                if grid.get(row, col) == Cell::Visited {
                    visited += 1;
                }
            }
        }
        // The 3 × 3 open interior plus the entry cell.
        assert_eq!(visited, 10);
    }

    #[test]
    fn test_describe_wording() {
        assert_eq!(
            SearchReport::Found {
                start: (0, 2),
                end: (4, 2),
            }
            .describe(),
            "Partial path found from (0, 2) to (4, 2)"
        );
        assert_eq!(SearchReport::NoPath.describe(), "No path found.");
        assert_eq!(
            SearchReport::EntryNotFound.describe(),
            "Entry point not found."
        );
    }
}
