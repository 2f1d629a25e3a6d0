//! Cost bounds for branch-and-bound pruning.
//!
//! A bounder estimates the best cost any completion of a partial network
//! can reach. If that estimate is no better than the incumbent, the branch
//! is pruned.

use std::cmp::max;
use std::fmt::Debug;

use netopt_core::{BoundMode, NetworkEvaluator, Node, Problem, Ratio};

/// Calculates admissible cost bounds for partial networks.
pub trait NetworkBounder: Send + Debug {
    /// Returns a value no greater than the `|cost|` of any completion of
    /// `network`.
    fn bound(&self, problem: &Problem, network: &Node) -> Ratio;
}

/// Bounds the total between its all-parallel and all-series extremes.
///
/// Every completion lands between the two totals, so if the smallest total
/// already overshoots, or the largest still falls short, the gap is a
/// lower bound on the cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtremalBounder;

impl ExtremalBounder {
    pub fn new() -> Self {
        Self
    }
}

impl NetworkBounder for ExtremalBounder {
    fn bound(&self, problem: &Problem, network: &Node) -> Ratio {
        let lower = NetworkEvaluator::evaluate_total(problem, network, BoundMode::Lower);
        let upper = NetworkEvaluator::evaluate_total(problem, network, BoundMode::Upper);
        max(problem.cost(&lower), -problem.cost(&upper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netopt_core::ratio;
    use netopt_test::{integer_problem, n, nt};
    use num_traits::Signed;

    #[test]
    fn test_bound_uses_tighter_side() {
        let problem = integer_problem(8);
        let network = n()
            .child(nt(&[1]))
            .child(nt(&[2, 3, 4]).child(nt(&[5, 6, 7])))
            .child(nt(&[8]));
        // The all-parallel total already overshoots the target.
        assert_eq!(
            ExtremalBounder.bound(&problem, &network),
            ratio(4211777, 49729)
        );
    }

    #[test]
    fn test_bound_negative_when_target_is_bracketed() {
        let problem = integer_problem(4);
        // 1|2|3 = 6/11 and 1+2+3 = 6 bracket the target total of 2.
        let network = n().child(nt(&[1, 2, 3]));
        let bound = ExtremalBounder.bound(&problem, &network);
        assert!(bound.is_negative());
        assert_eq!(bound, ratio(-448, 121));
    }

    #[test]
    fn test_bound_never_exceeds_cost_of_completion() {
        let problem = integer_problem(4);
        let partial = n().child(nt(&[1, 2, 3])).child(nt(&[4]));
        let complete = n()
            .child(n().child(nt(&[1])).child(nt(&[2])).child(nt(&[3])))
            .child(nt(&[4]));
        let bound = ExtremalBounder.bound(&problem, &partial);
        let cost = NetworkEvaluator::evaluate_cost(&problem, &complete, BoundMode::Exact);
        // (1|2|3) + 4 = 50/11, squared 2500/121, minus 4.
        assert_eq!(cost, ratio(2016, 121));
        assert!(bound <= cost);
    }
}
