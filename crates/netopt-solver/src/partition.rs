//! In-place enumeration of canonical bipartitions at one expansion point.

use netopt_core::{Child, Mask, Node, SubsetCoder, Value};

/// Splits the values of one expansion point between the point itself and a
/// temporary trailing child.
///
/// [`Bipartition::begin`] attaches the child, [`Bipartition::apply`] writes
/// one split, and [`Bipartition::finish`] detaches the child again. The
/// caller owns the original values and restores them afterwards.
pub(crate) struct Bipartition<'a> {
    path: &'a [usize],
    values: &'a [Value],
    has_children: bool,
}

impl<'a> Bipartition<'a> {
    /// Attaches an empty child to the node at `path`, whose values must
    /// already have been taken out as `values`.
    pub(crate) fn begin(network: &mut Node, path: &'a [usize], values: &'a [Value]) -> Self {
        let node = network.node_at_mut(path);
        debug_assert!(node.values.is_empty(), "values must be taken before splitting");
        let has_children = node.has_children();
        node.children.push(Child::Owned(Node::new()));
        Self {
            path,
            values,
            has_children,
        }
    }

    /// Number of canonical splits.
    pub(crate) fn count(&self) -> u64 {
        SubsetCoder::bipartitions(self.values.len())
    }

    /// Writes split `mask`: included values to the child, the rest back to
    /// the node. Returns false for the degenerate split that moves every
    /// value of a childless non-root node into a single child, which only
    /// repeats the shape one level down.
    pub(crate) fn apply(&self, network: &mut Node, mask: Mask) -> bool {
        let mut include = Vec::with_capacity(self.values.len());
        let mut exclude = Vec::with_capacity(self.values.len());
        SubsetCoder::decode(mask, self.values, &mut include, &mut exclude);

        let admissible = self.has_children || !exclude.is_empty() || self.path.is_empty();
        let node = network.node_at_mut(self.path);
        node.values = exclude;
        if let Some(Child::Owned(child)) = node.children.last_mut() {
            child.values = include;
        }
        admissible
    }

    /// Detaches the temporary child and clears the node's values.
    pub(crate) fn finish(self, network: &mut Node) {
        let node = network.node_at_mut(self.path);
        node.values.clear();
        node.children.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netopt_test::{n, nt};

    #[test]
    fn test_root_enumerates_every_split() {
        let mut network = nt(&[1, 2, 3]);
        let values = std::mem::take(&mut network.values);
        let split = Bipartition::begin(&mut network, &[], &values);
        assert_eq!(split.count(), 4);

        let mut shapes = Vec::new();
        for mask in 0..split.count() {
            assert!(split.apply(&mut network, mask as Mask));
            shapes.push(network.to_network());
        }
        split.finish(&mut network);
        network.values = values;

        assert_eq!(
            shapes,
            vec![
                "N({1,2})[N(0)]",
                "N(2)[N({0,1})]",
                "N(1)[N({0,2})]",
                "N()[N({0,1,2})]",
            ]
        );
        assert_eq!(network, nt(&[1, 2, 3]));
    }

    #[test]
    fn test_degenerate_split_is_rejected_below_root() {
        let mut network = n().child(nt(&[1, 2, 3]));
        let values = std::mem::take(&mut network.node_at_mut(&[0]).values);
        let split = Bipartition::begin(&mut network, &[0], &values);
        assert!(split.apply(&mut network, 0));
        assert!(!split.apply(&mut network, 0b11));
        split.finish(&mut network);
        assert_eq!(network, n().child(n()));
    }
}
