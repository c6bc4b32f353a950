//! The capability set every searchable puzzle state provides.
//!
//! A puzzle state is an immutable value. The solver only ever asks it four
//! questions: what is your identity, are you solved, where can you go next,
//! and (optionally) are you hopeless.

use std::hash::Hash;

use thiserror::Error;

/// A single configuration of a puzzle.
///
/// Implementations must keep every method free of side effects: calling any
/// of them twice yields equal results.
pub trait Puzzle: Clone + Eq {
    /// Canonical value used to deduplicate states during a search.
    ///
    /// Two states with equal keys are treated as the same state, so the key
    /// must agree with `Eq`.
    type Key: Hash + Eq;

    fn identity_key(&self) -> Self::Key;

    fn is_solved(&self) -> bool;

    /// All states reachable by exactly one legal move.
    ///
    /// An empty result means no move is possible, which is not the same thing
    /// as being solved. Never contains `self`.
    fn successors(&self) -> Vec<Self>;

    /// Returns true if this state provably cannot reach a solution.
    ///
    /// Depth-first search prunes such states without expanding them.
    fn is_dead_end(&self) -> bool {
        false
    }
}

/// Reasons a concrete puzzle refuses to construct a state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("grid has no cells")]
    EmptyGrid,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown marker {marker:?} at row {row}, column {col}")]
    UnknownMarker { marker: char, row: usize, col: usize },

    #[error("start grid is {start:?} but target grid is {target:?}")]
    ShapeMismatch {
        start: (usize, usize),
        target: (usize, usize),
    },

    #[error("grid must contain exactly one blank tile, found {0}")]
    BlankCount(usize),

    #[error("start and target grids do not hold the same tiles")]
    TileMismatch,

    #[error("word {0:?} is empty or not lowercase ascii")]
    InvalidWord(String),

    #[error("words {from:?} and {to:?} differ in length")]
    LengthMismatch { from: String, to: String },
}
