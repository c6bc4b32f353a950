//! Word ladders: step from one word to another, changing one letter at a
//! time, where every intermediate word must be in the dictionary.

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use crate::puzzle::{Puzzle, PuzzleError};

/// Letters a single step may substitute.
const ALPHABET: std::ops::RangeInclusive<u8> = b'a'..=b'z';

/// A word ladder positioned at `from`, aiming for `to`.
///
/// The dictionary is shared by every state derived from the same start.
#[derive(Debug, Clone)]
pub struct WordLadder {
    from: String,
    to: String,
    words: Rc<BTreeSet<String>>,
}

fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
}

impl WordLadder {
    /// Creates a ladder from `from` to `to` over `words`.
    ///
    /// Both words must be non-empty lowercase ascii of equal length. Dictionary
    /// entries of other lengths are kept but can never be reached.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        words: impl Into<Rc<BTreeSet<String>>>,
    ) -> Result<Self, PuzzleError> {
        let (from, to) = (from.into(), to.into());

        for word in [&from, &to] {
            if !is_valid_word(word) {
                return Err(PuzzleError::InvalidWord(word.clone()));
            }
        }
        if from.len() != to.len() {
            return Err(PuzzleError::LengthMismatch { from, to });
        }

        Ok(Self {
            from,
            to,
            words: words.into(),
        })
    }

    /// Convenience constructor over a borrowed word list.
    pub fn with_words<'a>(
        from: &str,
        to: &str,
        words: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, PuzzleError> {
        let words: BTreeSet<String> = words.into_iter().map(str::to_owned).collect();
        Self::new(from, to, words)
    }

    pub fn from_word(&self) -> &str {
        &self.from
    }

    pub fn to_word(&self) -> &str {
        &self.to
    }

    pub fn words(&self) -> &BTreeSet<String> {
        &self.words
    }

    fn step_to(&self, word: String) -> Self {
        Self {
            from: word,
            to: self.to.clone(),
            words: Rc::clone(&self.words),
        }
    }
}

impl PartialEq for WordLadder {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && (Rc::ptr_eq(&self.words, &other.words) || self.words == other.words)
    }
}

impl Eq for WordLadder {}

impl Puzzle for WordLadder {
    type Key = String;

    fn identity_key(&self) -> String {
        self.from.clone()
    }

    fn is_solved(&self) -> bool {
        self.from == self.to
    }

    /// Every dictionary word one letter away, position by position, then in
    /// alphabetical order of the substituted letter.
    fn successors(&self) -> Vec<Self> {
        if self.is_solved() {
            return Vec::new();
        }

        let mut candidate = self.from.clone().into_bytes();
        let mut successors = Vec::new();

        for position in 0..candidate.len() {
            let original = candidate[position];
            for letter in ALPHABET {
                if letter == original {
                    continue;
                }
                candidate[position] = letter;
                // only ascii lowercase bytes are ever written
                let word = std::str::from_utf8(&candidate).unwrap_or_default();
                if self.words.contains(word) {
                    successors.push(self.step_to(word.to_owned()));
                }
            }
            candidate[position] = original;
        }

        successors
    }
}

impl fmt::Display for WordLadder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{breadth_first_search, depth_first_search};

    fn words_of(path: &crate::node::SolutionPath<WordLadder>) -> Vec<&str> {
        path.iter().map(WordLadder::from_word).collect()
    }

    #[test]
    fn test_one_step_ladder() {
        let ladder = WordLadder::with_words("cape", "cope", ["cape", "cope", "tape", "tare"]).unwrap();
        for path in [depth_first_search(&ladder), breadth_first_search(&ladder)] {
            let path = path.expect("cape -> cope is one step");
            assert_eq!(words_of(&path), vec!["cape", "cope"]);
        }
    }

    #[test]
    fn test_missing_bridge_is_unsolvable() {
        let ladder = WordLadder::with_words("cape", "cope", ["cape", "tare"]).unwrap();
        assert!(depth_first_search(&ladder).is_none());
        assert!(breadth_first_search(&ladder).is_none());
    }

    #[test]
    fn test_successors_change_exactly_one_letter() {
        let ladder =
            WordLadder::with_words("cape", "cope", ["cape", "cope", "tape", "tare", "capes"]).unwrap();
        let next: Vec<_> = ladder.successors().iter().map(|l| l.from.clone()).collect();
        assert_eq!(next, vec!["tape", "cope"]);
    }

    #[test]
    fn test_solved_ladder_has_no_successors() {
        let ladder = WordLadder::with_words("ace", "ace", ["ace", "ape"]).unwrap();
        assert!(ladder.is_solved());
        assert!(ladder.successors().is_empty());
    }

    #[test]
    fn test_breadth_first_finds_shortest_ladder() {
        let words = ["cold", "cord", "card", "ward", "warm", "word", "worm", "corm"];
        let ladder = WordLadder::with_words("cold", "warm", words).unwrap();
        let path = breadth_first_search(&ladder).unwrap();
        assert_eq!(path.moves(), 4);
        assert_eq!(path.solution().from_word(), "warm");
        let dfs = depth_first_search(&ladder).unwrap();
        assert!(path.len() <= dfs.len());
    }

    #[test]
    fn test_rejects_bad_words() {
        let words = ["cape"];
        assert_eq!(
            WordLadder::with_words("cape", "cap", words).unwrap_err(),
            PuzzleError::LengthMismatch {
                from: "cape".into(),
                to: "cap".into()
            }
        );
        assert_eq!(
            WordLadder::with_words("", "", words).unwrap_err(),
            PuzzleError::InvalidWord(String::new())
        );
        assert_eq!(
            WordLadder::with_words("Cape", "cope", words).unwrap_err(),
            PuzzleError::InvalidWord("Cape".into())
        );
    }

    #[test]
    fn test_equality_includes_dictionary() {
        let a = WordLadder::with_words("case", "cape", ["case", "cape"]).unwrap();
        let b = WordLadder::with_words("case", "cape", ["cape", "case"]).unwrap();
        let c = WordLadder::with_words("case", "cape", ["case"]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), "case -> cape");
    }
}
