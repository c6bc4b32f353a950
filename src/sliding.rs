//! Sliding tile puzzles on an m x n grid, like the 15-puzzle.
//!
//! Tiles are arbitrary strings; `*` marks the single blank. A move slides a
//! tile orthogonally adjacent to the blank into it.

use std::fmt;

use crate::geometry::{manhattan, Coord, DIRECTIONS};
use crate::grid::Grid;
use crate::puzzle::{Puzzle, PuzzleError};

/// The blank tile marker.
pub const BLANK: &str = "*";

/// A sliding puzzle in configuration `from`, working towards `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingPuzzle {
    from: Grid<String>,
    to: Grid<String>,
    /// Position of the blank in `from`.
    blank: Coord,
}

fn find_blank(grid: &Grid<String>) -> Result<Coord, PuzzleError> {
    let count = grid.cells().iter().filter(|tile| *tile == BLANK).count();
    if count != 1 {
        return Err(PuzzleError::BlankCount(count));
    }
    grid.position(|tile| tile == BLANK)
        .ok_or(PuzzleError::BlankCount(0))
}

fn sorted_tiles(grid: &Grid<String>) -> Vec<&str> {
    let mut tiles: Vec<&str> = grid.cells().iter().map(String::as_str).collect();
    tiles.sort_unstable();
    tiles
}

impl SlidingPuzzle {
    /// Builds a puzzle from start and target rows.
    ///
    /// Both grids must be non-empty, rectangular and the same shape, hold
    /// exactly one blank, and contain the same tiles.
    pub fn new<F, T, FR, TR, FS, TS>(from_rows: F, to_rows: T) -> Result<Self, PuzzleError>
    where
        F: IntoIterator<Item = FR>,
        FR: IntoIterator<Item = FS>,
        FS: Into<String>,
        T: IntoIterator<Item = TR>,
        TR: IntoIterator<Item = TS>,
        TS: Into<String>,
    {
        let from = Grid::from_rows(
            from_rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect::<Vec<String>>()),
        )?;
        let to = Grid::from_rows(
            to_rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect::<Vec<String>>()),
        )?;

        if from.shape() != to.shape() {
            return Err(PuzzleError::ShapeMismatch {
                start: from.shape(),
                target: to.shape(),
            });
        }
        let blank = find_blank(&from)?;
        find_blank(&to)?;
        if sorted_tiles(&from) != sorted_tiles(&to) {
            return Err(PuzzleError::TileMismatch);
        }

        Ok(Self { from, to, blank })
    }

    /// Parses rows written as `"1,2,3/4,5,*"`: rows split on `/`, tiles on `,`.
    pub fn parse(from: &str, to: &str) -> Result<Self, PuzzleError> {
        let split = |text: &str| -> Vec<Vec<String>> {
            text.split('/')
                .map(|row| row.split(',').map(|tile| tile.trim().to_owned()).collect())
                .collect()
        };
        Self::new(split(from), split(to))
    }

    pub fn current(&self) -> &Grid<String> {
        &self.from
    }

    pub fn target(&self) -> &Grid<String> {
        &self.to
    }

    fn has_distinct_tiles(&self) -> bool {
        let tiles = sorted_tiles(&self.from);
        tiles.windows(2).all(|pair| pair[0] != pair[1])
    }

    /// Parity of the permutation taking `from` to `to`, blank included.
    ///
    /// Only meaningful when all tiles are distinct.
    fn permutation_is_odd(&self) -> bool {
        let cells = self.from.cells();
        let target_index: Vec<usize> = cells
            .iter()
            .map(|tile| {
                self.to
                    .cells()
                    .iter()
                    .position(|t| t == tile)
                    .unwrap_or_default()
            })
            .collect();

        // parity = (length - number of cycles) mod 2
        let mut seen = vec![false; target_index.len()];
        let mut cycles = 0;
        for start in 0..target_index.len() {
            if seen[start] {
                continue;
            }
            cycles += 1;
            let mut cursor = start;
            while !seen[cursor] {
                seen[cursor] = true;
                cursor = target_index[cursor];
            }
        }
        (target_index.len() - cycles) % 2 == 1
    }
}

impl Puzzle for SlidingPuzzle {
    type Key = Vec<String>;

    fn identity_key(&self) -> Vec<String> {
        self.from.cells().to_vec()
    }

    fn is_solved(&self) -> bool {
        self.from == self.to
    }

    /// Slides the tile above, below, left of, then right of the blank.
    fn successors(&self) -> Vec<Self> {
        let (rows, cols) = self.from.shape();
        DIRECTIONS
            .iter()
            .filter_map(|direction| direction.step(self.blank, 1, rows, cols))
            .map(|neighbour| {
                let mut next = self.clone();
                next.from.swap(self.blank, neighbour);
                next.blank = neighbour;
                next
            })
            .collect()
    }

    /// Every move swaps the blank with a tile and shifts the blank by one
    /// cell, so the permutation parity must match the blank's distance to
    /// its target. A mismatch can never be solved.
    fn is_dead_end(&self) -> bool {
        if !self.has_distinct_tiles() {
            return false;
        }
        let Some(target_blank) = self.to.position(|tile| tile == BLANK) else {
            return false;
        };
        let distance_is_odd = manhattan(self.blank, target_blank) % 2 == 1;
        self.permutation_is_odd() != distance_is_odd
    }
}

impl fmt::Display for SlidingPuzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from)
    }
}
