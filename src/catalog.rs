//! Built-in puzzles for demonstrations and benchmarks.

use crate::peg::PegSolitaire;
use crate::puzzle::PuzzleError;
use crate::sliding::SlidingPuzzle;
use crate::word_ladder::WordLadder;
use crate::PuzzleOps;

/// Dictionary for the short ladder.
pub const CAPE_WORDS: &[&str] = &["cape", "cope", "tape", "tare"];

/// Dictionary for the four-step ladder; several routes, one dead branch.
pub const COLD_WORDS: &[&str] = &[
    "cold", "cord", "card", "ward", "warm", "word", "worm", "corm", "bold", "bolt",
];

pub fn cape_to_cope() -> Result<WordLadder, PuzzleError> {
    WordLadder::with_words("cape", "cope", CAPE_WORDS.iter().copied())
}

pub fn cold_to_warm() -> Result<WordLadder, PuzzleError> {
    WordLadder::with_words("cold", "warm", COLD_WORDS.iter().copied())
}

/// One row, one swap.
pub fn slide_one_by_three() -> Result<SlidingPuzzle, PuzzleError> {
    SlidingPuzzle::parse("1,2,*", "1,*,2")
}

pub fn slide_two_by_three() -> Result<SlidingPuzzle, PuzzleError> {
    SlidingPuzzle::parse("*,2,3/1,4,5", "1,2,3/4,5,*")
}

/// Three pegs that reduce to one.
pub fn peg_corner() -> Result<PegSolitaire, PuzzleError> {
    PegSolitaire::parse("*../*../.*.")
}

/// Both first jumps leave two pegs too far apart to jump again.
pub fn peg_stranded() -> Result<PegSolitaire, PuzzleError> {
    PegSolitaire::parse("**.**")
}

/// A named catalog puzzle.
pub struct Entry {
    pub name: &'static str,
    pub puzzle: Box<dyn PuzzleOps>,
}

/// All catalog puzzles in display order.
pub fn entries() -> Result<Vec<Entry>, PuzzleError> {
    Ok(vec![
        Entry {
            name: "ladder: cape -> cope",
            puzzle: Box::new(cape_to_cope()?),
        },
        Entry {
            name: "ladder: cold -> warm",
            puzzle: Box::new(cold_to_warm()?),
        },
        Entry {
            name: "slide: 1x3",
            puzzle: Box::new(slide_one_by_three()?),
        },
        Entry {
            name: "slide: 2x3",
            puzzle: Box::new(slide_two_by_three()?),
        },
        Entry {
            name: "peg: corner",
            puzzle: Box::new(peg_corner()?),
        },
        Entry {
            name: "peg: stranded",
            puzzle: Box::new(peg_stranded()?),
        },
    ])
}
