//! Search tree nodes and the solution paths extracted from them.

use std::fmt;

use crate::puzzle::Puzzle;

/// An ordered, non-empty sequence of states from the start to a solved state.
///
/// Each consecutive pair is related by exactly one legal move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionPath<P> {
    states: Vec<P>,
}

impl<P> SolutionPath<P> {
    /// Wraps a root-to-solution state sequence.
    ///
    /// Returns `None` for an empty sequence.
    pub fn new(states: Vec<P>) -> Option<Self> {
        if states.is_empty() {
            None
        } else {
            Some(Self { states })
        }
    }

    /// The single-state path of a puzzle that is already solved.
    pub fn single(state: P) -> Self {
        Self {
            states: vec![state],
        }
    }

    pub fn states(&self) -> &[P] {
        &self.states
    }

    pub fn start(&self) -> &P {
        &self.states[0]
    }

    pub fn solution(&self) -> &P {
        &self.states[self.states.len() - 1]
    }

    /// Number of states on the path, including the start.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of moves, one less than the number of states.
    pub fn moves(&self) -> usize {
        self.states.len() - 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.states.iter()
    }

    pub fn into_states(self) -> Vec<P> {
        self.states
    }

    /// Applies `f` to every state, keeping the order.
    pub fn map<Q, F>(self, f: F) -> SolutionPath<Q>
    where
        F: FnMut(P) -> Q,
    {
        SolutionPath {
            states: self.states.into_iter().map(f).collect(),
        }
    }

    /// Materializes the path as a chain of search nodes, each owning at most
    /// one child.
    pub fn into_tree(self) -> SearchNode<P> {
        let mut states = self.states.into_iter().rev();
        // non-empty by construction
        let mut node = SearchNode::new(states.next().expect("solution path is never empty"));
        for state in states {
            let mut parent = SearchNode::new(state);
            parent.push_child(node);
            node = parent;
        }
        node
    }
}

impl<'a, P> IntoIterator for &'a SolutionPath<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

impl<P: fmt::Display> fmt::Display for SolutionPath<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, state) in self.states.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", state)?;
        }
        Ok(())
    }
}

/// One explored puzzle state plus the children explored from it.
///
/// A node exclusively owns its children. There is no parent link; upward
/// traversal goes through [`SolutionPath`], which is already ordered.
///
/// Cloning, comparing, formatting and dropping all walk the tree with an
/// explicit stack, so chains as deep as the puzzle graph are safe.
pub struct SearchNode<P> {
    state: P,
    children: Vec<SearchNode<P>>,
}

impl<P> SearchNode<P> {
    pub fn new(state: P) -> Self {
        Self {
            state,
            children: Vec::new(),
        }
    }

    pub fn state(&self) -> &P {
        &self.state
    }

    pub fn children(&self) -> &[SearchNode<P>] {
        &self.children
    }

    pub fn push_child(&mut self, child: SearchNode<P>) {
        self.children.push(child);
    }

    /// Number of nodes on the first-child chain starting here.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut node = self;
        while let Some(child) = node.children.first() {
            depth += 1;
            node = child;
        }
        depth
    }

    /// Pre-order walk yielding each state with its depth below this node.
    pub fn iter(&self) -> Nodes<'_, P> {
        Nodes {
            stack: vec![(0, self)],
        }
    }
}

/// Pre-order iterator over a search tree, see [`SearchNode::iter`].
pub struct Nodes<'a, P> {
    stack: Vec<(usize, &'a SearchNode<P>)>,
}

impl<'a, P> Iterator for Nodes<'a, P> {
    type Item = (usize, &'a P);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, &node.state))
    }
}

impl<P: Clone> Clone for SearchNode<P> {
    fn clone(&self) -> Self {
        // post-order: a node is rebuilt once its children sit at the end of `built`
        let mut built: Vec<SearchNode<P>> = Vec::new();
        let mut stack = vec![(self, false)];
        while let Some((node, children_done)) = stack.pop() {
            if children_done {
                let children = built.split_off(built.len() - node.children.len());
                built.push(SearchNode {
                    state: node.state.clone(),
                    children,
                });
            } else {
                stack.push((node, true));
                stack.extend(node.children.iter().rev().map(|child| (child, false)));
            }
        }
        built.pop().expect("the root is always rebuilt last")
    }
}

impl<P: PartialEq> PartialEq for SearchNode<P> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.state != b.state || a.children.len() != b.children.len() {
                return false;
            }
            pending.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl<P: Eq> Eq for SearchNode<P> {}

impl<P: fmt::Debug> fmt::Debug for SearchNode<P> {
    /// Flat pre-order list of `(depth, state)` pairs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<P: Puzzle> SearchNode<P> {
    /// Follows the first-child chain down to its leaf and returns the states
    /// along the way.
    ///
    /// For trees built by [`SolutionPath::into_tree`] this is the original
    /// path. Returns `None` if the leaf is not solved.
    pub fn into_path(self) -> Option<SolutionPath<P>> {
        let mut states = Vec::with_capacity(self.depth());
        let mut node = self;
        loop {
            states.push(node.state.clone());
            let mut children = std::mem::take(&mut node.children);
            if children.is_empty() {
                break;
            }
            node = children.swap_remove(0);
        }

        if states.last().is_some_and(|state| state.is_solved()) {
            SolutionPath::new(states)
        } else {
            None
        }
    }
}

impl<P> Drop for SearchNode<P> {
    fn drop(&mut self) {
        // unlink descendants one at a time so deep chains do not recurse
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl<P: fmt::Display> fmt::Display for SearchNode<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, (_, state)) in self.iter().enumerate() {
            if position > 0 {
                write!(f, "\n\n")?;
            }
            write!(f, "{}", state)?;
        }
        Ok(())
    }
}
