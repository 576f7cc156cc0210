//! Prefix tree of the paths looked up in one bulk match.
//!
//! Paths sharing a directory prefix share nodes, so the pattern trie only has
//! to advance its frontier once per distinct prefix.

use std::collections::HashMap;

use super::path_segments;

/// Index of a node in a [`PathTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(pub(crate) usize);

pub(crate) struct Node {
    pub(crate) children: HashMap<String, NodeId>,
    /// Input indices of the paths ending at this node.
    pub(crate) paths: Vec<usize>,
}

impl Node {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            paths: Vec::new(),
        }
    }
}

/// A prefix tree over path segments, used to walk many paths at once.
pub(crate) struct PathTree {
    nodes: Vec<Node>,
}

impl PathTree {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::new()],
        }
    }

    pub(crate) fn root_id() -> NodeId {
        NodeId(0)
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Returns the number of nodes, root included.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts `path`, remembering `index` at the node where it ends.
    pub(crate) fn insert(&mut self, path: &str, index: usize) {
        let mut current = Self::root_id();
        for segment in path_segments(path) {
            let child = self.nodes[current.0].children.get(segment);
            if let Some(&node_id) = child {
                current = node_id;
            } else {
                let node_id = NodeId(self.nodes.len());
                self.nodes.push(Node::new());
                self.nodes[current.0]
                    .children
                    .insert(segment.to_string(), node_id);
                current = node_id;
            }
        }
        self.nodes[current.0].paths.push(index);
    }
}

impl Default for PathTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(tree: &PathTree, path: &str) -> Option<NodeId> {
        let mut current = PathTree::root_id();
        for segment in path_segments(path) {
            current = *tree.node(current).children.get(segment)?;
        }
        Some(current)
    }

    #[test]
    fn shared_prefixes_share_nodes() {
        let mut tree = PathTree::new();
        tree.insert("foo/bar", 0);
        tree.insert("foo/bar/baz", 1);
        tree.insert("/foo/qux", 2);
        // root, foo, bar, baz, qux
        assert_eq!(tree.len(), 5);

        let bar = find(&tree, "foo/bar").unwrap();
        assert_eq!(tree.node(bar).paths, vec![0]);
        let qux = find(&tree, "foo/qux").unwrap();
        assert_eq!(tree.node(qux).paths, vec![2]);
    }

    #[test]
    fn duplicate_paths_keep_every_index() {
        let mut tree = PathTree::new();
        tree.insert("a/b", 0);
        tree.insert("/a/b/", 3);
        let node = find(&tree, "a/b").unwrap();
        assert_eq!(tree.node(node).paths, vec![0, 3]);
    }

    #[test]
    fn empty_path_lands_on_root() {
        let mut tree = PathTree::new();
        assert_eq!(tree.len(), 1);
        tree.insert("/", 7);
        assert_eq!(tree.node(PathTree::root_id()).paths, vec![7]);
        assert_eq!(tree.len(), 1);
    }
}
