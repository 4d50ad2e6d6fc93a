//! Grid data model for the secure room.
//!
//! This module contains the [`Cell`] enumeration and the [`Grid`] store that owns the room's
//! rows × cols cell array, together with the border helpers shared by the generator and the
//! pathfinder.

/// State of a single grid position.
///
/// This enumeration holds exactly the rendering and traversal state of one cell in the room. A
/// cell has no identity beyond its coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cell {
    /// Traversable cell produced by the generator's fill pass.
    Open,
    /// Non-traversable cell; also the reset value of the whole grid.
    Closed,
    /// The single entry marker on the border.
    Entry,
    /// The single exit marker on the border.
    Exit,
    /// Transient marker left by the pathfinder on cells it has explored.
    Visited,
    /// Transient marker left by the pathfinder on the discovered entry-to-exit corridor.
    PathMark,
}

/// Fixed-size addressable store of [`Cell`] values.
///
/// This structure owns the 2-D cell array and its dimensions. It is allocated once for the run
/// and mutated in place; it is never resized. It offers no behavior beyond bounds-checked
/// storage: an out-of-range access is an internal invariant violation and panics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    /// Number of rows in the grid.
    rows: usize,
    /// Number of columns in the grid.
    cols: usize,
    /// Cell values in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a new grid of the given dimensions with every cell [`Cell::Closed`].
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero. Dimensions are a configuration precondition enforced
    /// by the collaborator that collects them, not by the core.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows >= 1 && cols >= 1, "grid dimensions must be positive");

        Self {
            rows,
            cols,
            cells: vec![Cell::Closed; rows * cols],
        }
    }

    /// Returns the number of rows in the grid.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns in the grid.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the cell value at the given coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of range.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        let index = self.index(row, col);
        self.cells
            .get(index)
            .copied()
            .expect("cell index within asserted bounds")
    }

    /// Writes the cell value at the given coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of range.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let index = self.index(row, col);
        *self
            .cells
            .get_mut(index)
            .expect("cell index within asserted bounds") = cell;
    }

    /// Overwrites every cell with the given value.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Reports whether the given coordinates lie on the grid border.
    pub const fn is_border(&self, row: usize, col: usize) -> bool {
        row == 0 || row == self.rows - 1 || col == 0 || col == self.cols - 1
    }

    /// Returns the number of border cells, `2 × (rows + cols) − 4`.
    ///
    /// The formula assumes both dimensions are at least 2; smaller rooms are ruled out by the
    /// configuration preconditions.
    pub const fn perimeter_len(&self) -> usize {
        2 * (self.rows + self.cols) - 4
    }

    /// Walks the border cells in row-major order.
    ///
    /// Both entry/exit placement and the entry scan rely on this single ordering, so a perimeter
    /// index always resolves to the same border cell.
    pub fn border_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let rows = self.rows;
        let cols = self.cols;
        (0..rows)
            .flat_map(move |row| (0..cols).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.is_border(row, col))
    }

    /// Converts coordinates to the row-major cell index, asserting that they are in range.
    const fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell coordinates out of range"
        );

        row * self.cols + col
    }
}
