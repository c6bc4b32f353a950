//! Orthogonal moves on a rectangular grid.
//!
//! Both grid puzzles move things one or two cells along a row or column. The
//! direction order here is the order successors are enumerated in.

/// A `(row, col)` cell position.
pub type Coord = (usize, usize);

/// One of the four orthogonal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// All directions in enumeration order: up, down, left, right.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    /// Row and column deltas for one step.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Moves `distance` cells from `from`, staying inside `rows x cols`.
    ///
    /// Returns `None` if the destination falls off the grid.
    pub fn step(self, from: Coord, distance: usize, rows: usize, cols: usize) -> Option<Coord> {
        let (d_row, d_col) = self.delta();
        let row = from.0.checked_add_signed(d_row * distance as isize)?;
        let col = from.1.checked_add_signed(d_col * distance as isize)?;
        (row < rows && col < cols).then_some((row, col))
    }
}

/// Manhattan distance between two cells.
pub fn manhattan(a: Coord, b: Coord) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}
