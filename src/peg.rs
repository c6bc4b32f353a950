//! Peg solitaire on a rectangular board.
//!
//! A peg jumps orthogonally over an adjacent peg into an empty hole directly
//! beyond it, and the jumped peg is removed. The board is solved when a
//! single peg remains.

use std::fmt;

use crate::geometry::DIRECTIONS;
use crate::grid::Grid;
use crate::puzzle::{Puzzle, PuzzleError};

/// Contents of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// `*`
    Peg,
    /// `.`
    Hole,
    /// `#`, not part of the board.
    Unused,
}

impl Cell {
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '*' => Some(Cell::Peg),
            '.' => Some(Cell::Hole),
            '#' => Some(Cell::Unused),
            _ => None,
        }
    }

    pub fn marker(self) -> char {
        match self {
            Cell::Peg => '*',
            Cell::Hole => '.',
            Cell::Unused => '#',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// A snapshot of a peg solitaire board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PegSolitaire {
    board: Grid<Cell>,
}

impl PegSolitaire {
    /// Parses one string per row using the `*`, `.` and `#` markers.
    pub fn new<I, S>(rows: I) -> Result<Self, PuzzleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for (row, text) in rows.into_iter().enumerate() {
            let cells = text
                .as_ref()
                .chars()
                .enumerate()
                .map(|(col, marker)| {
                    Cell::from_marker(marker).ok_or(PuzzleError::UnknownMarker { marker, row, col })
                })
                .collect::<Result<Vec<Cell>, PuzzleError>>()?;
            parsed.push(cells);
        }

        Ok(Self {
            board: Grid::from_rows(parsed)?,
        })
    }

    /// Parses rows separated by `/`, e.g. `"**.**/*****"`.
    pub fn parse(text: &str) -> Result<Self, PuzzleError> {
        Self::new(text.split('/').map(str::trim))
    }

    pub fn board(&self) -> &Grid<Cell> {
        &self.board
    }

    pub fn peg_count(&self) -> usize {
        self.board
            .cells()
            .iter()
            .filter(|&&cell| cell == Cell::Peg)
            .count()
    }
}

impl Puzzle for PegSolitaire {
    type Key = Vec<Cell>;

    fn identity_key(&self) -> Vec<Cell> {
        self.board.cells().to_vec()
    }

    fn is_solved(&self) -> bool {
        self.peg_count() == 1
    }

    /// Every legal jump, pegs in row-major order, directions up, down, left,
    /// right.
    fn successors(&self) -> Vec<Self> {
        let (rows, cols) = self.board.shape();
        let mut jumps = Vec::new();

        for cell_index in 0..self.board.cells().len() {
            let from = self.board.idx_to_coord(cell_index);
            if *self.board.get(from) != Cell::Peg {
                continue;
            }

            for direction in DIRECTIONS {
                let (Some(over), Some(to)) = (
                    direction.step(from, 1, rows, cols),
                    direction.step(from, 2, rows, cols),
                ) else {
                    continue;
                };
                if *self.board.get(over) != Cell::Peg || *self.board.get(to) != Cell::Hole {
                    continue;
                }

                let mut next = self.clone();
                next.board.set(from, Cell::Hole);
                next.board.set(over, Cell::Hole);
                next.board.set(to, Cell::Peg);
                jumps.push(next);
            }
        }

        jumps
    }

    /// Pegs are only ever removed, so a board with none left can never get
    /// back to one.
    fn is_dead_end(&self) -> bool {
        self.peg_count() == 0
    }
}

impl fmt::Display for PegSolitaire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{breadth_first_search, depth_first_search};

    #[test]
    fn test_parse_and_display() {
        let board = PegSolitaire::parse("**.**/*****").unwrap();
        assert_eq!(board.to_string(), "**.**\n*****");
        assert_eq!(board.peg_count(), 9);
        assert_eq!(board.board().shape(), (2, 5));
    }

    #[test]
    fn test_rejects_bad_boards() {
        assert_eq!(
            PegSolitaire::parse("**x").unwrap_err(),
            PuzzleError::UnknownMarker {
                marker: 'x',
                row: 0,
                col: 2
            }
        );
        assert!(matches!(
            PegSolitaire::parse("***/**").unwrap_err(),
            PuzzleError::RaggedRow { .. }
        ));
        assert_eq!(PegSolitaire::parse("").unwrap_err(), PuzzleError::EmptyGrid);
    }

    #[test]
    fn test_single_peg_is_solved() {
        let board = PegSolitaire::parse("...../..*..").unwrap();
        assert!(board.is_solved());
        let path = depth_first_search(&board).unwrap();
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_jumps_remove_the_jumped_peg() {
        let board = PegSolitaire::parse("**.").unwrap();
        let next = board.successors();
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].to_string(), "..*");
        assert!(next[0].is_solved());
    }

    #[test]
    fn test_jumps_cannot_land_on_unused_cells() {
        let board = PegSolitaire::parse("**#.").unwrap();
        assert!(board.successors().is_empty());
        assert!(depth_first_search(&board).is_none());
        assert!(breadth_first_search(&board).is_none());
    }

    #[test]
    fn test_successor_order_is_row_major() {
        let board = PegSolitaire::parse(".**/..*/...").unwrap();
        let next: Vec<String> = board.successors().iter().map(ToString::to_string).collect();
        assert_eq!(
            next,
            vec![
                ".*./.../..*".replace('/', "\n"),
                "*../..*/...".replace('/', "\n"),
            ]
        );
    }

    #[test]
    fn test_empty_board_is_dead_end() {
        let board = PegSolitaire::parse("...").unwrap();
        assert!(board.is_dead_end());
        assert!(depth_first_search(&board).is_none());
    }

    #[test]
    fn test_small_board_is_solvable() {
        let board = PegSolitaire::parse("*../*../.*.").unwrap();
        for path in [depth_first_search(&board), breadth_first_search(&board)] {
            let path = path.expect("board reduces to one peg");
            assert_eq!(path.moves(), board.peg_count() - 1);
            for pair in path.states().windows(2) {
                assert!(pair[0].successors().contains(&pair[1]));
            }
        }
    }
}
