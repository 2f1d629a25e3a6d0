//! The partition tree.
//!
//! A [`Node`] holds element indices that are not yet grouped into children,
//! plus an ordered list of children. A child is either exclusively owned
//! and still mutable during search, or a closed subtree shared out of a
//! tabulated lookup table.
//!
//! The combining operator is never stored: the root combines in series and
//! each level below alternates.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::problem::Value;
use crate::ratio::Ratio;

/// Child indices leading from the root to a node.
///
/// Paths stay valid while children are only appended and popped, which is
/// the only way the solvers mutate a tree during search.
pub type NodePath = SmallVec<[usize; 8]>;

/// A node of the partition tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    /// Element indices combined directly under this node's operator.
    pub values: Vec<Value>,
    /// Values delegated to a tabulated child, kept so the delegation can
    /// be redone with a different candidate.
    pub hidden: Vec<Value>,
    pub children: Vec<Child>,
}

/// A child slot: owned and mutable, or a shared closed subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Owned(Node),
    Closed(Arc<ClosedNode>),
}

/// A fully resolved subtree with its reduced value.
///
/// The evaluator treats it as an opaque leaf contributing `value`; `node`
/// is only kept for rendering. Its internal operators start from series
/// regardless of where it is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedNode {
    pub value: Ratio,
    pub node: Node,
}

impl ClosedNode {
    pub fn new(value: Ratio, node: Node) -> Self {
        Self { value, node }
    }
}

impl Child {
    /// The tree behind this child, owned or shared.
    pub fn node(&self) -> &Node {
        match self {
            Child::Owned(node) => node,
            Child::Closed(closed) => &closed.node,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Child::Closed(_))
    }

    pub fn as_owned(&self) -> Option<&Node> {
        match self {
            Child::Owned(node) => Some(node),
            Child::Closed(_) => None,
        }
    }

    pub fn as_owned_mut(&mut self) -> Option<&mut Node> {
        match self {
            Child::Owned(node) => Some(node),
            Child::Closed(_) => None,
        }
    }
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    /// A node holding a single value.
    pub fn leaf(value: Value) -> Self {
        Self::from_values([value])
    }

    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            values: values.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Appends an owned child, builder style.
    pub fn child(mut self, node: Node) -> Self {
        self.children.push(Child::Owned(node));
        self
    }

    /// Appends a shared closed child, builder style.
    pub fn closed_child(mut self, closed: Arc<ClosedNode>) -> Self {
        self.children.push(Child::Closed(closed));
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the node at `path`, descending into closed subtrees if needed.
    ///
    /// # Panics
    ///
    /// Panics if the path does not exist.
    pub fn node_at(&self, path: &[usize]) -> &Node {
        path.iter()
            .fold(self, |node, &idx| node.children[idx].node())
    }

    /// Returns the owned node at `path` for mutation.
    ///
    /// # Panics
    ///
    /// Panics if the path does not exist or crosses a closed subtree.
    pub fn node_at_mut(&mut self, path: &[usize]) -> &mut Node {
        let mut node = self;
        for &idx in path {
            node = match &mut node.children[idx] {
                Child::Owned(child) => child,
                Child::Closed(_) => panic!("path {path:?} crosses a closed subtree at {idx}"),
            };
        }
        node
    }

    /// Number of element indices placed anywhere in this tree, `values` and
    /// `hidden` included. Closed subtrees are not counted; their elements
    /// are accounted for by the `hidden` values of the node holding them.
    pub fn placed_count(&self) -> usize {
        self.values.len()
            + self.hidden.len()
            + self
                .children
                .iter()
                .filter_map(Child::as_owned)
                .map(Node::placed_count)
                .sum::<usize>()
    }

    /// Rewrites the tree so every element sits in its own leaf.
    ///
    /// A childless node with two values becomes two single-value children.
    /// Any other node with children has its own values moved into one new
    /// trailing child. Shared closed subtrees are copied before rewriting.
    pub fn leafify(&mut self) {
        if self.children.is_empty() {
            if self.values.len() == 2 {
                let values = std::mem::take(&mut self.values);
                self.children
                    .extend(values.into_iter().map(|v| Child::Owned(Node::leaf(v))));
            }
            return;
        }
        for child in &mut self.children {
            match child {
                Child::Owned(node) => node.leafify(),
                Child::Closed(closed) => Arc::make_mut(closed).node.leafify(),
            }
        }
        if !self.values.is_empty() {
            let values = std::mem::take(&mut self.values);
            self.children.push(Child::Owned(Node::from_values(values)));
        }
    }
}
