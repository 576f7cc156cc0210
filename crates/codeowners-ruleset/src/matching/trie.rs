//! Prefix tree over compiled pattern parts.
//!
//! Every pattern inserted into a [`PatternTrie`] becomes a path of nodes, one
//! per [`PatternPart`]; patterns sharing a prefix share nodes. Matching walks
//! the trie with a frontier of live nodes, so a path is tested against all
//! patterns in one pass instead of one pass per pattern.

use std::collections::HashMap;

use log::trace;

use super::nfa::StateSet;
use super::path_tree::PathTree;
use super::{CompiledPattern, PatternPart, path_segments};

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Default)]
struct Node {
    /// Children reached by a literal segment.
    exact: HashMap<String, NodeId>,
    /// Children reached by `*` or a mixed glob segment.
    wildcards: Vec<(PatternPart, NodeId)>,
    /// Child reached by `**`. It consumes any segment by looping on itself.
    any_sub_path: Option<NodeId>,
    /// True when this node was reached through a `**` edge.
    self_loop: bool,
    /// Values of the patterns that end at this node.
    values: Vec<usize>,
}

/// A trie of compiled patterns, each tagged with a value.
///
/// Values are usually declaration indices; [`PatternTrie::best_match`]
/// returns the largest value among the patterns matching a path.
#[derive(Debug)]
pub struct PatternTrie {
    nodes: Vec<Node>,
    patterns: usize,
}

impl Default for PatternTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternTrie {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            patterns: 0,
        }
    }

    /// Returns the number of patterns inserted.
    pub fn len(&self) -> usize {
        self.patterns
    }

    /// Returns true if no pattern was inserted.
    pub fn is_empty(&self) -> bool {
        self.patterns == 0
    }

    /// Returns the number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts a compiled pattern tagged with `value`.
    pub fn insert(&mut self, pattern: &CompiledPattern, value: usize) {
        let mut current = ROOT;
        for part in pattern.parts() {
            current = self.child_or_insert(current, part);
        }
        self.nodes[current].values.push(value);
        self.patterns += 1;
    }

    fn child_or_insert(&mut self, parent: NodeId, part: &PatternPart) -> NodeId {
        let existing = match part {
            PatternPart::Exact(text) => self.nodes[parent].exact.get(text).copied(),
            PatternPart::AnySubPath => self.nodes[parent].any_sub_path,
            _ => self.nodes[parent]
                .wildcards
                .iter()
                .find(|(p, _)| p == part)
                .map(|&(_, id)| id),
        };
        if let Some(id) = existing {
            return id;
        }

        let id = self.nodes.len();
        self.nodes.push(Node {
            self_loop: part.is_any_sub_path(),
            ..Node::default()
        });
        let node = &mut self.nodes[parent];
        match part {
            PatternPart::Exact(text) => {
                node.exact.insert(text.clone(), id);
            }
            PatternPart::AnySubPath => node.any_sub_path = Some(id),
            _ => node.wildcards.push((part.clone(), id)),
        }
        id
    }

    /// Returns the largest value among the patterns matching `path`.
    pub fn best_match(&self, path: &str) -> Option<usize> {
        let mut frontier = self.initial_frontier();
        let mut next = StateSet::new(self.nodes.len());
        for segment in path_segments(path) {
            self.step(&frontier, segment, &mut next);
            if next.is_empty() {
                return None;
            }
            std::mem::swap(&mut frontier, &mut next);
        }
        self.best_value(&frontier)
    }

    /// Returns every value whose pattern matches `path`, in ascending order.
    pub fn all_matches(&self, path: &str) -> Vec<usize> {
        let mut frontier = self.initial_frontier();
        let mut next = StateSet::new(self.nodes.len());
        for segment in path_segments(path) {
            self.step(&frontier, segment, &mut next);
            std::mem::swap(&mut frontier, &mut next);
        }
        let mut values: Vec<usize> = frontier
            .iter()
            .flat_map(|id| self.nodes[id].values.iter().copied())
            .collect();
        values.sort_unstable();
        values
    }

    /// Matches many paths at once, returning the best value for each path in
    /// input order.
    ///
    /// Paths sharing a directory prefix share the frontier computed for that
    /// prefix.
    pub fn best_matches<S: AsRef<str>>(&self, paths: &[S]) -> Vec<Option<usize>> {
        let mut tree = PathTree::new();
        for (index, path) in paths.iter().enumerate() {
            tree.insert(path.as_ref(), index);
        }
        trace!(
            "Matching {} paths through {} path nodes",
            paths.len(),
            tree.len()
        );

        let mut results = vec![None; paths.len()];
        let mut stack = vec![(self.initial_frontier(), PathTree::root_id())];
        while let Some((frontier, node_id)) = stack.pop() {
            let node = tree.node(node_id);
            if !node.paths.is_empty() {
                let best = self.best_value(&frontier);
                for &index in &node.paths {
                    results[index] = best;
                }
            }

            for (segment, &child_id) in &node.children {
                let mut next = StateSet::new(self.nodes.len());
                self.step(&frontier, segment, &mut next);
                if !next.is_empty() {
                    stack.push((next, child_id));
                }
            }
        }
        results
    }

    fn initial_frontier(&self) -> StateSet {
        let mut frontier = StateSet::new(self.nodes.len());
        frontier.insert(ROOT);
        self.expand(&mut frontier);
        frontier
    }

    fn step(&self, frontier: &StateSet, segment: &str, next: &mut StateSet) {
        next.clear();
        for id in frontier.iter() {
            let node = &self.nodes[id];
            if node.self_loop {
                next.insert(id);
            }
            if let Some(&child) = node.exact.get(segment) {
                next.insert(child);
            }
            for (part, child) in &node.wildcards {
                if part.matches_segment(segment) {
                    next.insert(*child);
                }
            }
        }
        self.expand(next);
    }

    // Adds every node reachable through zero or more `**` edges.
    fn expand(&self, frontier: &mut StateSet) {
        let mut pending: Vec<NodeId> = frontier.iter().collect();
        while let Some(id) = pending.pop() {
            if let Some(child) = self.nodes[id].any_sub_path
                && frontier.insert(child)
            {
                pending.push(child);
            }
        }
    }

    fn best_value(&self, frontier: &StateSet) -> Option<usize> {
        frontier
            .iter()
            .filter_map(|id| self.nodes[id].values.iter().copied().max())
            .max()
    }
}
