//! Puzzle State Search
//!
//! Solves word ladders, sliding tile puzzles and peg solitaire boards with
//! depth-first or breadth-first search and prints the move sequence.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use puzzle_search::peg::PegSolitaire;
use puzzle_search::sliding::SlidingPuzzle;
use puzzle_search::word_ladder::WordLadder;
use puzzle_search::{
    catalog, persistence, PuzzleOps, SearchOutcome, SearchReport, Solver, SolverConfig, Strategy,
};

/// Searches puzzle state spaces for a path to a solved configuration.
#[derive(Parser)]
#[command(name = "puzzle-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Search strategy to run.
    #[arg(long, value_enum, default_value_t = StrategyArg::Both, global = true)]
    strategy: StrategyArg,

    /// Give up after this many milliseconds.
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Give up after expanding this many states.
    #[arg(long, global = true)]
    max_expansions: Option<usize>,

    /// Print the solution as a search tree instead of a numbered path.
    #[arg(long, global = true)]
    tree: bool,

    /// Save the first solution found to this file.
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Step from one word to another, one letter at a time.
    Ladder {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Whitespace-separated dictionary file.
        #[arg(long)]
        words: Option<PathBuf>,
        /// Extra dictionary words (repeatable).
        #[arg(long = "word")]
        extra_words: Vec<String>,
    },
    /// Slide tiles into the blank (`*`). Rows split on `/`, tiles on `,`.
    Slide {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Jump pegs until one is left. `*` peg, `.` hole, `#` unused; rows split on `/`.
    Peg { board: String },
    /// Solve the built-in puzzles.
    Demo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Dfs,
    Bfs,
    Both,
}

impl StrategyArg {
    fn strategies(self) -> &'static [Strategy] {
        match self {
            StrategyArg::Dfs => &[Strategy::DepthFirst],
            StrategyArg::Bfs => &[Strategy::BreadthFirst],
            StrategyArg::Both => &[Strategy::BreadthFirst, Strategy::DepthFirst],
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let solver = Solver::new(SolverConfig {
        max_expansions: cli.max_expansions,
        timeout: cli.timeout_ms.map(Duration::from_millis),
    });
    let strategies = cli.strategy.strategies();

    let puzzle: Box<dyn PuzzleOps> = match &cli.command {
        Command::Ladder {
            from,
            to,
            words,
            extra_words,
        } => Box::new(build_ladder(from, to, words.as_ref(), extra_words)?),
        Command::Slide { from, to } => Box::new(
            SlidingPuzzle::parse(from, to).context("invalid sliding puzzle")?,
        ),
        Command::Peg { board } => {
            Box::new(PegSolitaire::parse(board).context("invalid peg board")?)
        }
        Command::Demo => return run_demo(&solver, strategies, cli.tree),
    };

    println!("{}\n", puzzle.describe());
    let mut saved = false;
    for &strategy in strategies {
        let report = puzzle.solve(strategy, &solver);
        info!("{} search took {:?}", strategy, report.elapsed);
        print!("{}", render_report(strategy, &report, cli.tree));

        if let (Some(output), SearchOutcome::Solved(path), false) =
            (&cli.output, &report.outcome, saved)
        {
            persistence::save_solution(output, path)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("Wrote {}", output.display());
            saved = true;
        }
    }

    Ok(())
}

/// Builds a word ladder from a dictionary file and/or extra words.
fn build_ladder(
    from: &str,
    to: &str,
    words: Option<&PathBuf>,
    extra_words: &[String],
) -> anyhow::Result<WordLadder> {
    let mut dictionary = match words {
        Some(path) => persistence::load_word_set(path)
            .with_context(|| format!("failed to read dictionary {}", path.display()))?,
        None => BTreeSet::new(),
    };
    dictionary.extend(extra_words.iter().map(|word| word.to_ascii_lowercase()));

    if dictionary.is_empty() {
        bail!("no dictionary: pass --words <FILE> or at least one --word");
    }

    WordLadder::new(from, to, dictionary).context("invalid word ladder")
}

/// Solves every catalog puzzle with each strategy.
fn run_demo(solver: &Solver, strategies: &[Strategy], tree: bool) -> anyhow::Result<()> {
    for entry in catalog::entries().context("catalog puzzle rejected")? {
        println!("=== {} ===", entry.name);
        println!("{}\n", entry.puzzle.describe());
        for &strategy in strategies {
            let report = entry.puzzle.solve(strategy, solver);
            info!("{} on {} took {:?}", strategy, entry.name, report.elapsed);
            print!("{}", render_report(strategy, &report, tree));
        }
    }
    Ok(())
}

/// Formats one search result for the terminal.
fn render_report(strategy: Strategy, report: &SearchReport<String>, tree: bool) -> String {
    let expanded = report.stats.expanded;
    let mut output = format!("{}:\n", strategy);

    match &report.outcome {
        SearchOutcome::Solved(path) => {
            output.push_str(&format!(
                "solved in {} moves ({} states expanded)\n\n",
                path.moves(),
                expanded
            ));
            if tree {
                output.push_str(&path.clone().into_tree().to_string());
                output.push('\n');
            } else {
                output.push_str(&persistence::format_solution(path));
            }
        }
        SearchOutcome::Unsolvable => {
            output.push_str(&format!("no solution ({} states expanded)\n", expanded));
        }
        SearchOutcome::Interrupted(limit) => {
            output.push_str(&format!(
                "gave up: {} after {} states expanded\n",
                limit, expanded
            ));
        }
    }
    output.push('\n');
    output
}
