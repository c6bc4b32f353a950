//! Rectangular grid storage shared by the grid puzzles.
//!
//! Cells are kept in a flat row-major vector, so a grid's cell slice doubles
//! as a cheap identity key.

use std::fmt;

use crate::geometry::Coord;
use crate::puzzle::PuzzleError;

/// A non-empty `rows x cols` grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Builds a grid from row vectors.
    ///
    /// Fails if there are no cells or the rows differ in length.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, PuzzleError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
    {
        let mut cells = Vec::new();
        let mut row_count = 0;
        let mut cols = 0;

        for (row_index, row) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(row);
            let width = cells.len() - before;

            if row_index == 0 {
                cols = width;
            } else if width != cols {
                return Err(PuzzleError::RaggedRow {
                    row: row_index,
                    expected: cols,
                    found: width,
                });
            }
            row_count += 1;
        }

        if cells.is_empty() {
            return Err(PuzzleError::EmptyGrid);
        }

        Ok(Self {
            rows: row_count,
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Converts a cell position to its flat index.
    #[inline(always)]
    pub fn coord_to_idx(&self, (row, col): Coord) -> usize {
        row * self.cols + col
    }

    /// Converts a flat index to its cell position.
    #[inline(always)]
    pub fn idx_to_coord(&self, cell_index: usize) -> Coord {
        (cell_index / self.cols, cell_index % self.cols)
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn get(&self, coord: Coord) -> &T {
        &self.cells[self.coord_to_idx(coord)]
    }

    pub fn set(&mut self, coord: Coord, value: T) {
        let cell_index = self.coord_to_idx(coord);
        self.cells[cell_index] = value;
    }

    pub fn swap(&mut self, a: Coord, b: Coord) {
        let (a, b) = (self.coord_to_idx(a), self.coord_to_idx(b));
        self.cells.swap(a, b);
    }

    /// Position of the first cell matching `predicate`, in row-major order.
    pub fn position(&self, predicate: impl Fn(&T) -> bool) -> Option<Coord> {
        self.cells
            .iter()
            .position(predicate)
            .map(|cell_index| self.idx_to_coord(cell_index))
    }

    /// Iterates over rows as slices.
    pub fn iter_rows(&self) -> std::slice::Chunks<'_, T> {
        self.cells.chunks(self.cols)
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    /// One row per line, cells written back to back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.iter_rows().enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}
