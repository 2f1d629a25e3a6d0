//! Best cost termination.

use netopt_core::Ratio;

use super::Termination;
use crate::scope::LocalSearchScope;

/// Terminates once the best cost is at most a limit.
///
/// A limit of zero stops on the first exact hit.
#[derive(Debug, Clone)]
pub struct BestCostTermination {
    limit: Ratio,
}

impl BestCostTermination {
    pub fn new(limit: Ratio) -> Self {
        Self { limit }
    }
}

impl Termination for BestCostTermination {
    fn is_terminated(&self, scope: &LocalSearchScope) -> bool {
        scope.best_cost().is_some_and(|cost| *cost <= self.limit)
    }
}
