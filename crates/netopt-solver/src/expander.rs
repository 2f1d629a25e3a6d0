//! Resumable cursor over the expansion points of a tree.

use netopt_core::{Node, NodePath};

/// Depth-first cursor yielding, one call at a time, the nodes that can
/// still be partitioned.
///
/// A node qualifies when it holds more than two values, or more than one
/// value and either has children or is the root. The order is load-bearing:
/// the solvers branch on the first, second and third points returned.
///
/// Each popped node pushes its owned children in order before it is
/// tested, so later children are visited first. Closed subtrees are fully
/// resolved and never visited.
#[derive(Debug, Clone)]
pub struct Expander {
    stack: Vec<NodePath>,
}

impl Expander {
    /// Creates a cursor positioned at the root.
    pub fn new() -> Self {
        Self {
            stack: vec![NodePath::new()],
        }
    }

    /// Returns the path of the next expansion point, resuming where the
    /// previous call stopped.
    ///
    /// The tree must not be restructured between calls; appending values to
    /// a returned node is fine.
    pub fn expandable(&mut self, network: &Node) -> Option<NodePath> {
        while let Some(path) = self.stack.pop() {
            let node = network.node_at(&path);
            for (idx, child) in node.children.iter().enumerate() {
                if !child.is_closed() {
                    let mut child_path = path.clone();
                    child_path.push(idx);
                    self.stack.push(child_path);
                }
            }
            let len = node.values.len();
            if len > 2 || (len > 1 && (node.has_children() || path.is_empty())) {
                return Some(path);
            }
        }
        None
    }
}

impl Default for Expander {
    fn default() -> Self {
        Self::new()
    }
}
