//! Literal tree builders.
//!
//! Fixtures read more naturally with element numbers than with indices, so
//! [`nt`] takes 1-based numbers and stores 0-based indices.

use netopt_core::{Node, Value};

/// An empty node, to be filled with `.child(..)`.
pub fn n() -> Node {
    Node::new()
}

/// A node holding the given 1-based element numbers.
///
/// # Panics
///
/// Panics on element number 0.
pub fn nt(numbers: &[Value]) -> Node {
    Node::from_values(numbers.iter().map(|&number| {
        assert!(number > 0, "element numbers start at 1");
        number - 1
    }))
}
