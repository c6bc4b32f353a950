//! File I/O for dictionaries and solutions.
//!
//! Dictionary files are plain text, words separated by any whitespace.
//! Tokens are lowercased; tokens with non-alphabetic characters are skipped.
//!
//! Solution files list one block per state:
//! - a `Move N:` header (`Start:` for the first state)
//! - the state as rendered by its `Display` impl
//! - a blank line

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::node::SolutionPath;

/// Reads a whitespace-separated word list.
pub fn load_word_set(path: impl AsRef<Path>) -> io::Result<BTreeSet<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let words = parse_word_set(&text);
    debug!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

/// Splits `text` into a set of lowercase alphabetic words.
pub fn parse_word_set(text: &str) -> BTreeSet<String> {
    text.split_whitespace()
        .filter(|token| token.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_ascii_lowercase)
        .collect()
}

/// Formats a rendered path as numbered blocks.
pub fn format_solution(path: &SolutionPath<String>) -> String {
    let mut output = String::new();
    for (step, state) in path.iter().enumerate() {
        if step == 0 {
            output.push_str("Start:\n");
        } else {
            output.push_str(&format!("Move {}:\n", step));
        }
        output.push_str(state);
        output.push_str("\n\n");
    }
    output
}

/// Writes a rendered path to `path` in the numbered block format.
pub fn save_solution(path: impl AsRef<Path>, solution: &SolutionPath<String>) -> io::Result<()> {
    let path = path.as_ref();
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "Solved in {} moves\n", solution.moves())?;
    file.write_all(format_solution(solution).as_bytes())?;
    file.flush()?;
    debug!("wrote {} states to {}", solution.len(), path.display());
    Ok(())
}
