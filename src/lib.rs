//! Puzzle State Search Library
//!
//! Generic depth-first and breadth-first search over the move graphs of
//! puzzles, plus three concrete puzzles: word ladders, sliding tiles and
//! peg solitaire.

pub mod catalog;
pub mod geometry;
pub mod grid;
pub mod node;
pub mod peg;
pub mod persistence;
pub mod puzzle;
pub mod sliding;
pub mod solver;
pub mod word_ladder;

use std::fmt;

pub use node::{Nodes, SearchNode, SolutionPath};
pub use puzzle::{Puzzle, PuzzleError};
pub use solver::{
    breadth_first_search, depth_first_search, Limit, SearchOutcome, SearchReport, SearchStats,
    Solver, SolverConfig, Strategy,
};

/// Trait that erases the concrete puzzle type for dynamic dispatch.
///
/// Solutions come back with every state already rendered through `Display`,
/// so callers can drive any puzzle without naming its type.
pub trait PuzzleOps {
    /// Renders the start state.
    fn describe(&self) -> String;
    fn solve(&self, strategy: Strategy, solver: &Solver) -> SearchReport<String>;
}

impl<P> PuzzleOps for P
where
    P: Puzzle + fmt::Display,
{
    fn describe(&self) -> String {
        self.to_string()
    }

    fn solve(&self, strategy: Strategy, solver: &Solver) -> SearchReport<String> {
        solver
            .search(strategy, self)
            .map(|state| state.to_string())
    }
}
