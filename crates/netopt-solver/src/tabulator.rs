//! Precomputed subtree shapes for small element subsets.
//!
//! For every subset of at most `arity` elements the tabulator enumerates
//! every distinct partition tree, reduces each to its value, and stores
//! the closed results sorted by value under the subset's bitmask. Because
//! a network's total grows monotonically with any one subtree's value, a
//! sorted candidate list supports a binary search for one open subset and
//! a two-pointer sweep for two.

use std::collections::HashMap;
use std::sync::Arc;

use netopt_config::MAX_TABULATION_ARITY;
use netopt_core::{
    BoundMode, Child, ClosedNode, Mask, NetworkError, NetworkEvaluator, Node, Problem, Ratio,
    Result, SubsetCoder, Value,
};
use num_traits::Signed;
use tracing::{debug, trace};

use crate::expander::Expander;
use crate::partition::Bipartition;

/// Lookup table of closed subtrees keyed by subset mask.
#[derive(Debug, Clone)]
pub struct Tabulator {
    arity: usize,
    lookup_table: HashMap<Mask, Vec<Arc<ClosedNode>>>,
}

impl Tabulator {
    /// Creates an empty tabulator for subsets of up to `arity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Config`] if `arity` is zero or wider than a
    /// subset mask.
    pub fn new(arity: usize) -> Result<Self> {
        if arity == 0 || arity > MAX_TABULATION_ARITY {
            return Err(NetworkError::Config(format!(
                "tabulation arity must be in 1..={MAX_TABULATION_ARITY}, got {arity}"
            )));
        }
        Ok(Self {
            arity,
            lookup_table: HashMap::new(),
        })
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns true if a set of `len` values is tabulated.
    pub fn covers(&self, len: usize) -> bool {
        len <= self.arity
    }

    /// Number of tabulated subsets.
    pub fn entry_count(&self) -> usize {
        self.lookup_table.len()
    }

    /// Total number of tabulated shapes across all subsets.
    pub fn candidate_count(&self) -> usize {
        self.lookup_table.values().map(Vec::len).sum()
    }

    /// Rebuilds the table for `problem`, discarding any previous contents.
    pub fn tabulate(&mut self, problem: &Problem) {
        self.lookup_table.clear();
        let mut subset = Vec::with_capacity(self.arity);
        self.tabulate_subsets(problem, &mut subset, 0);
        debug!(
            event = "tabulated",
            arity = self.arity,
            subsets = self.entry_count(),
            shapes = self.candidate_count(),
        );
    }

    /// Visits every nonempty subset of at most `arity` elements, skipping
    /// index `i` before including it.
    fn tabulate_subsets(&mut self, problem: &Problem, subset: &mut Vec<Value>, i: Value) {
        if i >= problem.len() {
            if !subset.is_empty() {
                let mut entry = Vec::new();
                let mut network = Node::from_values(subset.iter().copied());
                enumerate_shapes(problem, &mut network, &mut entry);
                // Stable: equal values keep enumeration order.
                entry.sort_by(|a, b| a.value.cmp(&b.value));
                self.lookup_table.insert(SubsetCoder::encode(subset), entry);
            }
            return;
        }
        self.tabulate_subsets(problem, subset, i + 1);
        if subset.len() < self.arity {
            subset.push(i);
            self.tabulate_subsets(problem, subset, i + 1);
            subset.pop();
        }
    }

    /// Candidates for `values`, sorted ascending by value.
    ///
    /// # Panics
    ///
    /// Panics if the subset was not tabulated.
    pub fn candidates(&self, values: &[Value]) -> &[Arc<ClosedNode>] {
        let mask = SubsetCoder::encode(values);
        match self.lookup_table.get(&mask) {
            Some(entry) if !entry.is_empty() => entry,
            _ => panic!(
                "subset {values:?} is not tabulated (arity {}, {} entries)",
                self.arity,
                self.lookup_table.len()
            ),
        }
    }

    /// Finds the candidate for `values` that, attached under the node at
    /// `path`, minimizes the network's cost.
    ///
    /// Probes are attached and detached again; `network` is unchanged on
    /// return. The rest of the network must be fully resolved.
    pub fn binary_search(
        &self,
        problem: &Problem,
        network: &mut Node,
        path: &[usize],
        values: &[Value],
    ) -> Arc<ClosedNode> {
        let entry = self.candidates(values);
        let mut lo = 0;
        let mut hi = entry.len();
        let mut best: Option<(Ratio, usize)> = None;
        while lo < hi {
            let mid = (lo + hi) / 2;
            let cost = probe(problem, network, &[(path, &entry[mid])]);
            let abs_cost = cost.abs();
            if best.as_ref().map_or(true, |(best_cost, _)| abs_cost < *best_cost) {
                best = Some((abs_cost, mid));
            }
            if cost.is_negative() {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        let idx = best.map_or(0, |(_, idx)| idx);
        Arc::clone(&entry[idx])
    }

    /// Jointly chooses candidates for two open subsets.
    ///
    /// Sweeps the first list upward from its smallest value and the second
    /// downward from its largest, advancing whichever pointer moves the
    /// signed cost toward zero. Probes are detached again on return.
    pub fn linear_search(
        &self,
        problem: &Problem,
        network: &mut Node,
        path_0: &[usize],
        path_1: &[usize],
        values_0: &[Value],
        values_1: &[Value],
    ) -> (Arc<ClosedNode>, Arc<ClosedNode>) {
        let entry_0 = self.candidates(values_0);
        let entry_1 = self.candidates(values_1);
        let mut lo = 0;
        let mut hi = entry_1.len();
        let mut best: Option<(Ratio, usize, usize)> = None;
        while lo < entry_0.len() && hi > 0 {
            let top = hi - 1;
            let cost = probe(
                problem,
                network,
                &[(path_0, &entry_0[lo]), (path_1, &entry_1[top])],
            );
            let abs_cost = cost.abs();
            if best.as_ref().map_or(true, |(best_cost, _, _)| abs_cost < *best_cost) {
                best = Some((abs_cost, lo, top));
            }
            if cost.is_negative() {
                lo += 1;
            } else {
                hi -= 1;
            }
        }
        let (idx_0, idx_1) = best.map_or((0, 0), |(_, idx_0, idx_1)| (idx_0, idx_1));
        (Arc::clone(&entry_0[idx_0]), Arc::clone(&entry_1[idx_1]))
    }
}

/// Attaches each candidate under its path, evaluates the signed cost, and
/// detaches them again in reverse order.
fn probe(problem: &Problem, network: &mut Node, attachments: &[(&[usize], &Arc<ClosedNode>)]) -> Ratio {
    for (path, candidate) in attachments {
        network
            .node_at_mut(path)
            .children
            .push(Child::Closed(Arc::clone(candidate)));
    }
    let total = NetworkEvaluator::evaluate_total(problem, network, BoundMode::Exact);
    for (path, _) in attachments.iter().rev() {
        network.node_at_mut(path).children.pop();
    }
    let cost = problem.cost(&total);
    trace!(event = "probe", cost = %cost);
    cost
}

/// Enumerates every distinct tree shape over the values of `network`,
/// pushing each finished shape as a closed node.
fn enumerate_shapes(problem: &Problem, network: &mut Node, entry: &mut Vec<Arc<ClosedNode>>) {
    let Some(path) = Expander::new().expandable(network) else {
        let value = NetworkEvaluator::evaluate_total(problem, network, BoundMode::Exact);
        entry.push(Arc::new(ClosedNode::new(value, network.clone())));
        return;
    };
    let values = std::mem::take(&mut network.node_at_mut(&path).values);
    let split = Bipartition::begin(network, &path, &values);
    for mask in 0..split.count() {
        if split.apply(network, mask as Mask) {
            enumerate_shapes(problem, network, entry);
        }
    }
    split.finish(network);
    network.node_at_mut(&path).values = values;
}
