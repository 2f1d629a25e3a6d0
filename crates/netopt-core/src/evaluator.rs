//! Exact reduction of a partition tree to a single value.

use num_traits::{Signed, Zero};

use crate::node::{Child, Node};
use crate::problem::Problem;
use crate::ratio::Ratio;

/// Combination rule of one tree level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Additive combination.
    Series,
    /// Reciprocal of the sum of reciprocals.
    Parallel,
}

impl Operator {
    /// The operator of the next level down.
    pub fn flip(self) -> Self {
        match self {
            Operator::Series => Operator::Parallel,
            Operator::Parallel => Operator::Series,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Series => '+',
            Operator::Parallel => '|',
        }
    }

    fn term(self, value: Ratio) -> Ratio {
        match self {
            Operator::Series => value,
            Operator::Parallel => value.recip(),
        }
    }

    fn finish(self, acc: Ratio) -> Ratio {
        match self {
            Operator::Series => acc,
            Operator::Parallel => acc.recip(),
        }
    }

    /// Combines a group of values under this operator.
    pub fn combine(self, values: impl IntoIterator<Item = Ratio>) -> Ratio {
        let acc = values
            .into_iter()
            .fold(Ratio::zero(), |acc, value| acc + self.term(value));
        self.finish(acc)
    }
}

/// Which reduction to perform.
///
/// The bound modes force every group that could still be partitioned onto
/// one operator. Series combination never decreases a total and parallel
/// never increases it, so the two modes bracket every completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundMode {
    /// Normal alternation.
    #[default]
    Exact,
    /// All undetermined structure in series: the largest attainable total.
    Upper,
    /// All undetermined structure in parallel: the smallest attainable total.
    Lower,
}

impl BoundMode {
    fn forced(self) -> Option<Operator> {
        match self {
            BoundMode::Exact => None,
            BoundMode::Upper => Some(Operator::Series),
            BoundMode::Lower => Some(Operator::Parallel),
        }
    }
}

/// Reduces trees to totals and costs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkEvaluator;

impl NetworkEvaluator {
    /// Reduces `node` as a root, which combines in series.
    pub fn evaluate_total(problem: &Problem, node: &Node, mode: BoundMode) -> Ratio {
        Self::reduce(problem, node, mode, Operator::Series)
    }

    /// Reduces `node` with `op` as its own operator.
    ///
    /// # Panics
    ///
    /// Panics if a parallel level reduces to zero, which only happens for a
    /// node with neither values nor children.
    pub fn reduce(problem: &Problem, node: &Node, mode: BoundMode, op: Operator) -> Ratio {
        let mut acc = Ratio::zero();
        if !node.values.is_empty() {
            let value_op = match mode.forced() {
                Some(forced) if node.values.len() > 2 || node.has_children() => forced,
                _ => op,
            };
            let group = value_op.combine(node.values.iter().map(|&v| problem[v].clone()));
            acc += op.term(group);
        }
        for child in &node.children {
            let sub = match child {
                Child::Closed(closed) => closed.value.clone(),
                Child::Owned(owned) => Self::reduce(problem, owned, mode, op.flip()),
            };
            acc += op.term(sub);
        }
        op.finish(acc)
    }

    /// `|cost(total)|` of the tree.
    pub fn evaluate_cost(problem: &Problem, node: &Node, mode: BoundMode) -> Ratio {
        problem
            .cost(&Self::evaluate_total(problem, node, mode))
            .abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::node::ClosedNode;
    use crate::problem::{TargetSpec, Value};
    use crate::ratio::{integer, ratio};
    use crate::series::Series;

    fn problem(n: usize) -> Problem {
        Problem::from_series(Series::Int, n, &TargetSpec::Squared(integer(n as i64))).unwrap()
    }

    fn nt(values: &[Value]) -> Node {
        Node::from_values(values.iter().map(|v| v - 1))
    }

    fn cost(problem: &Problem, node: &Node) -> Ratio {
        NetworkEvaluator::evaluate_cost(problem, node, BoundMode::Exact)
    }

    #[test]
    fn test_operator_combine() {
        assert_eq!(Operator::Series.combine([integer(2), integer(3)]), integer(5));
        assert_eq!(Operator::Parallel.combine([integer(2), integer(3)]), ratio(6, 5));
        assert_eq!(Operator::Parallel.combine([integer(4)]), integer(4));
        assert_eq!(Operator::Series.flip(), Operator::Parallel);
        assert_eq!(Operator::Parallel.symbol(), '|');
    }

    #[test]
    fn test_all_series() {
        let problem = problem(5);
        let node = Node::new()
            .child(nt(&[1]))
            .child(nt(&[2]))
            .child(nt(&[3]))
            .child(nt(&[4]))
            .child(nt(&[5]));
        assert_eq!(NetworkEvaluator::evaluate_total(&problem, &node, BoundMode::Exact), integer(15));
        assert_eq!(cost(&problem, &node), integer(220));
    }

    #[test]
    fn test_all_parallel() {
        let problem = problem(5);
        let inner = Node::new()
            .child(nt(&[1]))
            .child(nt(&[2]))
            .child(nt(&[3]))
            .child(nt(&[4]))
            .child(nt(&[5]));
        let node = Node::new().child(inner);
        assert_eq!(cost(&problem, &node), ratio(90245, 18769));
    }

    #[test]
    fn test_ladder() {
        let problem = problem(5);
        let node = Node::new().child(nt(&[1])).child(
            Node::new().child(nt(&[2])).child(
                Node::new()
                    .child(nt(&[3]))
                    .child(Node::new().child(nt(&[4])).child(nt(&[5]))),
            ),
        );
        assert_eq!(cost(&problem, &node), ratio(4156, 4225));
    }

    #[test]
    fn test_bound_modes() {
        let problem = problem(8);
        let node = Node::new()
            .child(nt(&[1]))
            .child(nt(&[2, 3, 4]).child(nt(&[5, 6, 7])))
            .child(nt(&[8]));
        assert_eq!(
            NetworkEvaluator::evaluate_cost(&problem, &node, BoundMode::Upper),
            integer(217)
        );
        assert_eq!(
            NetworkEvaluator::evaluate_cost(&problem, &node, BoundMode::Lower),
            ratio(4211777, 49729)
        );
    }

    #[test]
    fn test_bound_modes_bracket_exact() {
        let problem = problem(8);
        let node = Node::new()
            .child(nt(&[1]))
            .child(nt(&[2, 3, 4]).child(nt(&[5, 6, 7])))
            .child(nt(&[8]));
        let lower = NetworkEvaluator::evaluate_total(&problem, &node, BoundMode::Lower);
        let upper = NetworkEvaluator::evaluate_total(&problem, &node, BoundMode::Upper);
        let exact = NetworkEvaluator::evaluate_total(&problem, &node, BoundMode::Exact);
        assert!(lower <= exact && exact <= upper);
    }

    #[test]
    fn test_closed_child_contributes_its_value() {
        let problem = problem(3);
        let closed = Arc::new(ClosedNode::new(integer(10), nt(&[1, 2])));
        let node = Node::new().closed_child(closed).child(nt(&[3]));
        assert_eq!(
            NetworkEvaluator::evaluate_total(&problem, &node, BoundMode::Exact),
            integer(13)
        );

        let closed = Arc::new(ClosedNode::new(integer(6), nt(&[1, 2])));
        let parallel = Node::new().child(Node::new().closed_child(closed).child(nt(&[3])));
        assert_eq!(
            NetworkEvaluator::evaluate_total(&problem, &parallel, BoundMode::Exact),
            integer(2)
        );
    }

    #[test]
    fn test_cost_is_never_negative() {
        let problem = problem(4);
        for node in [nt(&[1, 2]), Node::new().child(nt(&[1, 2, 3, 4])), nt(&[1])] {
            assert!(!cost(&problem, &node).is_negative());
        }
    }
}
