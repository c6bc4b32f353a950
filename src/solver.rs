//! Depth-first and breadth-first search over puzzle state graphs.
//!
//! Both searches:
//! - Keep an `FxHashSet` of identity keys scoped to a single call, so cycles
//!   and transpositions are expanded at most once
//! - Use explicit stacks and queues instead of recursion, so graph depth is
//!   never coupled to call-stack depth
//! - Return "no solution" as an ordinary value
//!
//! Successors are tried in the order `Puzzle::successors` yields them; that
//! order is the only tie-break between equally good moves.
//!
//! Memory grows with the number of distinct states reached before a solution
//! is found. For very large or unbounded state spaces, cap the search with
//! [`SolverConfig`].

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::node::SolutionPath;
use crate::puzzle::Puzzle;

/// Search limits. The default is unlimited.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Stop after this many states have been expanded.
    pub max_expansions: Option<usize>,
    /// Stop once this much time has elapsed.
    pub timeout: Option<Duration>,
}

/// Which limit cut a search short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Expansions,
    Timeout,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Expansions => write!(f, "expansion limit reached"),
            Limit::Timeout => write!(f, "timed out"),
        }
    }
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<P> {
    Solved(SolutionPath<P>),
    /// Every reachable state was explored without finding a solution.
    Unsolvable,
    /// A configured limit stopped the search first; solvability is unknown.
    Interrupted(Limit),
}

impl<P> SearchOutcome<P> {
    pub fn path(&self) -> Option<&SolutionPath<P>> {
        match self {
            SearchOutcome::Solved(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<SolutionPath<P>> {
        match self {
            SearchOutcome::Solved(path) => Some(path),
            _ => None,
        }
    }

    pub fn map<Q, F>(self, f: F) -> SearchOutcome<Q>
    where
        F: FnMut(P) -> Q,
    {
        match self {
            SearchOutcome::Solved(path) => SearchOutcome::Solved(path.map(f)),
            SearchOutcome::Unsolvable => SearchOutcome::Unsolvable,
            SearchOutcome::Interrupted(limit) => SearchOutcome::Interrupted(limit),
        }
    }
}

/// Counters collected during one search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Distinct states whose successors were enumerated.
    pub expanded: usize,
    /// Successor states produced.
    pub generated: usize,
    /// Successors dropped because their key was already visited.
    pub duplicates: usize,
    /// Largest stack depth (depth-first) or queue length (breadth-first).
    pub peak_frontier: usize,
}

/// Outcome plus statistics of one search call.
#[derive(Debug, Clone)]
pub struct SearchReport<P> {
    pub outcome: SearchOutcome<P>,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

impl<P> SearchReport<P> {
    /// Converts the states of a found path, keeping the statistics.
    pub fn map<Q, F>(self, f: F) -> SearchReport<Q>
    where
        F: FnMut(P) -> Q,
    {
        SearchReport {
            outcome: self.outcome.map(f),
            stats: self.stats,
            elapsed: self.elapsed,
        }
    }
}

/// The two traversal orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    DepthFirst,
    BreadthFirst,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::DepthFirst => write!(f, "depth-first"),
            Strategy::BreadthFirst => write!(f, "breadth-first"),
        }
    }
}

/// Runs searches under a [`SolverConfig`].
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

/// Tracks the configured limits for one search call.
struct Budget {
    max_expansions: Option<usize>,
    deadline: Option<Instant>,
}

impl Budget {
    fn new(config: &SolverConfig, started: Instant) -> Self {
        Self {
            max_expansions: config.max_expansions,
            deadline: config.timeout.map(|timeout| started + timeout),
        }
    }

    /// Checked before each expansion.
    #[inline]
    fn check(&self, stats: &SearchStats) -> Result<(), Limit> {
        if self
            .max_expansions
            .is_some_and(|max| stats.expanded >= max)
        {
            return Err(Limit::Expansions);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(Limit::Timeout);
        }
        Ok(())
    }
}

/// A state on the depth-first stack, with the successors not yet tried.
struct Frame<P> {
    state: P,
    pending: std::vec::IntoIter<P>,
}

/// A discovered state in breadth-first search, linked to its discoverer.
struct Discovered<P> {
    state: P,
    parent: Option<usize>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn search<P: Puzzle>(&self, strategy: Strategy, start: &P) -> SearchReport<P> {
        match strategy {
            Strategy::DepthFirst => self.depth_first(start),
            Strategy::BreadthFirst => self.breadth_first(start),
        }
    }

    /// Depth-first search returning the first solution found.
    ///
    /// A state is marked visited when it is expanded. Dead ends and states
    /// without successors fail their branch without being expanded.
    pub fn depth_first<P: Puzzle>(&self, start: &P) -> SearchReport<P> {
        let started = Instant::now();
        let budget = Budget::new(&self.config, started);
        let mut stats = SearchStats::default();

        let outcome = depth_first_inner(start, &budget, &mut stats);
        let elapsed = started.elapsed();
        debug!(
            "depth-first finished in {:?}: {} expanded, {} generated, {} duplicates",
            elapsed, stats.expanded, stats.generated, stats.duplicates
        );

        SearchReport {
            outcome,
            stats,
            elapsed,
        }
    }

    /// Breadth-first search returning a solution with the fewest moves.
    ///
    /// States are marked visited when enqueued, so each distinct state enters
    /// the queue at most once.
    pub fn breadth_first<P: Puzzle>(&self, start: &P) -> SearchReport<P> {
        let started = Instant::now();
        let budget = Budget::new(&self.config, started);
        let mut stats = SearchStats::default();

        let outcome = breadth_first_inner(start, &budget, &mut stats);
        let elapsed = started.elapsed();
        debug!(
            "breadth-first finished in {:?}: {} expanded, {} generated, {} duplicates",
            elapsed, stats.expanded, stats.generated, stats.duplicates
        );

        SearchReport {
            outcome,
            stats,
            elapsed,
        }
    }
}

fn depth_first_inner<P: Puzzle>(
    start: &P,
    budget: &Budget,
    stats: &mut SearchStats,
) -> SearchOutcome<P> {
    if start.is_solved() {
        return SearchOutcome::Solved(SolutionPath::single(start.clone()));
    }
    if start.is_dead_end() {
        trace!("start state is a dead end");
        return SearchOutcome::Unsolvable;
    }
    if let Err(limit) = budget.check(stats) {
        return SearchOutcome::Interrupted(limit);
    }

    let mut visited: FxHashSet<P::Key> = FxHashSet::default();
    let successors = start.successors();
    stats.expanded += 1;
    stats.generated += successors.len();
    visited.insert(start.identity_key());

    let mut search_stack = vec![Frame {
        state: start.clone(),
        pending: successors.into_iter(),
    }];
    stats.peak_frontier = 1;

    while let Some(frame) = search_stack.last_mut() {
        let Some(next) = frame.pending.next() else {
            // every successor failed; backtrack
            search_stack.pop();
            continue;
        };

        let key = next.identity_key();
        if visited.contains(&key) {
            stats.duplicates += 1;
            continue;
        }

        if next.is_solved() {
            debug!("depth-first found a solution at depth {}", search_stack.len());
            let states: Vec<P> = search_stack
                .into_iter()
                .map(|frame| frame.state)
                .chain(std::iter::once(next))
                .collect();
            return SearchOutcome::Solved(SolutionPath::new(states).expect("path holds the start"));
        }

        if next.is_dead_end() {
            trace!("pruned dead end at depth {}", search_stack.len());
            visited.insert(key);
            continue;
        }

        if let Err(limit) = budget.check(stats) {
            debug!("depth-first interrupted: {}", limit);
            return SearchOutcome::Interrupted(limit);
        }

        let successors = next.successors();
        stats.expanded += 1;
        stats.generated += successors.len();
        visited.insert(key);
        if successors.is_empty() {
            continue;
        }

        search_stack.push(Frame {
            state: next,
            pending: successors.into_iter(),
        });
        stats.peak_frontier = stats.peak_frontier.max(search_stack.len());
    }

    SearchOutcome::Unsolvable
}

fn breadth_first_inner<P: Puzzle>(
    start: &P,
    budget: &Budget,
    stats: &mut SearchStats,
) -> SearchOutcome<P> {
    let mut visited: FxHashSet<P::Key> = FxHashSet::default();
    visited.insert(start.identity_key());

    // discovered states never move, so queue entries and parent links are indices
    let mut discovered = vec![Discovered {
        state: start.clone(),
        parent: None,
    }];
    let mut frontier: VecDeque<usize> = VecDeque::from([0]);
    stats.peak_frontier = 1;

    while let Some(current) = frontier.pop_front() {
        if discovered[current].state.is_solved() {
            debug!("breadth-first found a solution after {} expansions", stats.expanded);
            return SearchOutcome::Solved(extract_path(&discovered, current));
        }

        if let Err(limit) = budget.check(stats) {
            debug!("breadth-first interrupted: {}", limit);
            return SearchOutcome::Interrupted(limit);
        }

        let successors = discovered[current].state.successors();
        stats.expanded += 1;
        stats.generated += successors.len();

        for successor in successors {
            // mark at enqueue time so a state is queued at most once
            if !visited.insert(successor.identity_key()) {
                stats.duplicates += 1;
                continue;
            }
            frontier.push_back(discovered.len());
            discovered.push(Discovered {
                state: successor,
                parent: Some(current),
            });
        }
        stats.peak_frontier = stats.peak_frontier.max(frontier.len());
    }

    SearchOutcome::Unsolvable
}

/// Walks parent links back from `terminal` and returns the start-to-terminal path.
fn extract_path<P: Puzzle>(discovered: &[Discovered<P>], terminal: usize) -> SolutionPath<P> {
    let mut states = Vec::new();
    let mut cursor = Some(terminal);
    while let Some(index) = cursor {
        states.push(discovered[index].state.clone());
        cursor = discovered[index].parent;
    }
    states.reverse();
    SolutionPath::new(states).expect("path holds the terminal state")
}

/// Depth-first search with no limits.
///
/// Returns the first path found, or `None` if no solved state is reachable.
pub fn depth_first_search<P: Puzzle>(start: &P) -> Option<SolutionPath<P>> {
    Solver::default().depth_first(start).outcome.into_path()
}

/// Breadth-first search with no limits.
///
/// Returns a path with the fewest moves, or `None` if no solved state is
/// reachable.
pub fn breadth_first_search<P: Puzzle>(start: &P) -> Option<SolutionPath<P>> {
    Solver::default().breadth_first(start).outcome.into_path()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A puzzle over an explicit directed graph; node `goal` is solved.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct GraphPuzzle {
        node: usize,
        goal: usize,
        edges: &'static [&'static [usize]],
        dead: &'static [usize],
    }

    impl GraphPuzzle {
        fn at(&self, node: usize) -> Self {
            Self { node, ..*self }
        }
    }

    impl Puzzle for GraphPuzzle {
        type Key = usize;

        fn identity_key(&self) -> usize {
            self.node
        }

        fn is_solved(&self) -> bool {
            self.node == self.goal
        }

        fn successors(&self) -> Vec<Self> {
            self.edges[self.node].iter().map(|&n| self.at(n)).collect()
        }

        fn is_dead_end(&self) -> bool {
            self.dead.contains(&self.node)
        }
    }

    fn graph(edges: &'static [&'static [usize]], goal: usize) -> GraphPuzzle {
        GraphPuzzle {
            node: 0,
            goal,
            edges,
            dead: &[],
        }
    }

    fn nodes(path: &SolutionPath<GraphPuzzle>) -> Vec<usize> {
        path.iter().map(|state| state.node).collect()
    }

    fn assert_moves_are_legal(path: &SolutionPath<GraphPuzzle>) {
        for pair in path.states().windows(2) {
            assert!(
                pair[0].successors().contains(&pair[1]),
                "{} -> {} is not a legal move",
                pair[0].node,
                pair[1].node
            );
        }
    }

    /// 0 -> 1 -> 2 -> 3 -> 4 (goal), plus a shortcut 0 -> 5 -> 4 listed last.
    const LONG_AND_SHORT: &[&[usize]] = &[&[1, 5], &[2], &[3], &[4], &[], &[4]];

    /// 0 <-> 1 <-> 2, goal unreachable at 3.
    const CYCLE: &[&[usize]] = &[&[1], &[0, 2], &[1, 0], &[]];

    #[test]
    fn test_solved_start_returns_single_state() {
        let start = graph(LONG_AND_SHORT, 0);
        for path in [depth_first_search(&start), breadth_first_search(&start)] {
            let path = path.expect("solved start should succeed");
            assert_eq!(nodes(&path), vec![0]);
        }
    }

    #[test]
    fn test_no_successors_is_unsolvable() {
        let start = graph(&[&[]], 1);
        assert!(depth_first_search(&start).is_none());
        assert!(breadth_first_search(&start).is_none());
    }

    #[test]
    fn test_cycles_terminate() {
        let start = graph(CYCLE, 3);
        let dfs = Solver::default().depth_first(&start);
        let bfs = Solver::default().breadth_first(&start);
        assert_eq!(dfs.outcome, SearchOutcome::Unsolvable);
        assert_eq!(bfs.outcome, SearchOutcome::Unsolvable);
        assert_eq!(dfs.stats.expanded, 3, "each state expanded once");
        assert_eq!(bfs.stats.expanded, 3, "each state expanded once");
    }

    #[test]
    fn test_cycle_with_reachable_goal() {
        // 0 <-> 1, 1 -> 2 (goal)
        let start = graph(&[&[1], &[0, 2], &[]], 2);
        assert_eq!(nodes(&depth_first_search(&start).unwrap()), vec![0, 1, 2]);
        assert_eq!(nodes(&breadth_first_search(&start).unwrap()), vec![0, 1, 2]);
    }

    #[test]
    fn test_depth_first_returns_first_found() {
        let start = graph(LONG_AND_SHORT, 4);
        let path = depth_first_search(&start).unwrap();
        assert_eq!(nodes(&path), vec![0, 1, 2, 3, 4]);
        assert_moves_are_legal(&path);
    }

    #[test]
    fn test_breadth_first_returns_shortest() {
        let start = graph(LONG_AND_SHORT, 4);
        let bfs = breadth_first_search(&start).unwrap();
        let dfs = depth_first_search(&start).unwrap();
        assert_eq!(nodes(&bfs), vec![0, 5, 4]);
        assert!(bfs.len() <= dfs.len());
        assert_moves_are_legal(&bfs);
    }

    #[test]
    fn test_depth_first_prunes_dead_ends() {
        let start = GraphPuzzle {
            dead: &[1],
            ..graph(LONG_AND_SHORT, 4)
        };
        let report = Solver::default().depth_first(&start);
        let path = report.outcome.into_path().unwrap();
        assert_eq!(nodes(&path), vec![0, 5, 4]);
        assert_eq!(report.stats.expanded, 2, "node 1 must not be expanded");
    }

    #[test]
    fn test_dead_end_start_is_unsolvable() {
        let start = GraphPuzzle {
            dead: &[0],
            ..graph(LONG_AND_SHORT, 4)
        };
        assert!(depth_first_search(&start).is_none());
    }

    #[test]
    fn test_depth_first_skips_states_visited_in_other_branches() {
        // 0 -> {1, 2}, 1 -> 3, 2 -> 3, 3 -> 1, goal 4 unreachable
        let start = graph(&[&[1, 2], &[3], &[3], &[1], &[]], 4);
        let report = Solver::default().depth_first(&start);
        assert_eq!(report.outcome, SearchOutcome::Unsolvable);
        assert_eq!(report.stats.expanded, 4);
        assert_eq!(report.stats.duplicates, 2);
    }

    #[test]
    fn test_depth_first_enumerates_stuck_leaves_once() {
        // 0 -> {1, 2}, 1 -> 3, 2 -> 3, 3 has no moves, goal 4 unreachable
        let start = graph(&[&[1, 2], &[3], &[3], &[], &[]], 4);
        let report = Solver::default().depth_first(&start);
        assert_eq!(report.outcome, SearchOutcome::Unsolvable);
        assert_eq!(report.stats.expanded, 4, "node 3 must be enumerated once");
        assert_eq!(report.stats.duplicates, 1);
    }

    #[test]
    fn test_depth_first_tests_dead_ends_once() {
        let start = GraphPuzzle {
            dead: &[3],
            ..graph(&[&[1, 2], &[3], &[3], &[], &[]], 4)
        };
        let report = Solver::default().depth_first(&start);
        assert_eq!(report.outcome, SearchOutcome::Unsolvable);
        assert_eq!(report.stats.expanded, 3, "dead end 3 is never expanded");
        assert_eq!(report.stats.duplicates, 1, "second edge into 3 is a duplicate");
    }

    #[test]
    fn test_breadth_first_enqueues_each_state_once() {
        // diamond: 0 -> {1, 2}, both -> 3 (goal)
        let start = graph(&[&[1, 2], &[3], &[3], &[]], 3);
        let report = Solver::default().breadth_first(&start);
        assert_eq!(nodes(report.outcome.path().unwrap()), vec![0, 1, 3]);
        assert_eq!(report.stats.duplicates, 1);
        assert_eq!(report.stats.peak_frontier, 2);
    }

    #[test]
    fn test_expansion_limit_interrupts() {
        let start = graph(LONG_AND_SHORT, 4);
        let solver = Solver::new(SolverConfig {
            max_expansions: Some(1),
            timeout: None,
        });
        let dfs = solver.depth_first(&start);
        assert_eq!(dfs.outcome, SearchOutcome::Interrupted(Limit::Expansions));
        assert_eq!(dfs.stats.expanded, 1);
        let bfs = solver.breadth_first(&start);
        assert_eq!(bfs.outcome, SearchOutcome::Interrupted(Limit::Expansions));
    }

    #[test]
    fn test_zero_timeout_interrupts() {
        let start = graph(LONG_AND_SHORT, 4);
        let solver = Solver::new(SolverConfig {
            max_expansions: None,
            timeout: Some(Duration::ZERO),
        });
        assert_eq!(
            solver.breadth_first(&start).outcome,
            SearchOutcome::Interrupted(Limit::Timeout)
        );
        // a solved start needs no expansion, so limits do not apply
        let solved = graph(LONG_AND_SHORT, 0);
        assert!(solver.depth_first(&solved).outcome.path().is_some());
    }

    /// A line graph 0 -> 1 -> ... -> n; deep enough to overflow a recursive search.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Line {
        position: u32,
        length: u32,
    }

    impl Puzzle for Line {
        type Key = u32;

        fn identity_key(&self) -> u32 {
            self.position
        }

        fn is_solved(&self) -> bool {
            self.position == self.length
        }

        fn successors(&self) -> Vec<Self> {
            let mut next = Vec::new();
            if self.position > 0 {
                next.push(Line {
                    position: self.position - 1,
                    ..*self
                });
            }
            if self.position < self.length {
                next.push(Line {
                    position: self.position + 1,
                    ..*self
                });
            }
            next
        }
    }

    #[test]
    fn test_deep_graph_does_not_overflow() {
        let start = Line {
            position: 0,
            length: 300_000,
        };
        let dfs = depth_first_search(&start).unwrap();
        assert_eq!(dfs.moves(), 300_000);
        let bfs = breadth_first_search(&start).unwrap();
        assert_eq!(bfs.moves(), 300_000);
    }

    #[test]
    fn test_search_dispatches_on_strategy() {
        let start = graph(LONG_AND_SHORT, 4);
        let solver = Solver::default();
        let dfs = solver.search(Strategy::DepthFirst, &start);
        let bfs = solver.search(Strategy::BreadthFirst, &start);
        assert_eq!(dfs.outcome.path().map(SolutionPath::len), Some(5));
        assert_eq!(bfs.outcome.path().map(SolutionPath::len), Some(3));
    }
}
