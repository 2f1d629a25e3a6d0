//! Round count termination.

use super::Termination;
use crate::scope::LocalSearchScope;

/// Terminates after a number of restart rounds.
///
/// # Example
///
/// ```
/// use netopt_solver::termination::RoundCountTermination;
///
/// let term = RoundCountTermination::new(1000);
/// ```
#[derive(Debug, Clone)]
pub struct RoundCountTermination {
    limit: u64,
}

impl RoundCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for RoundCountTermination {
    fn is_terminated(&self, scope: &LocalSearchScope) -> bool {
        scope.round_count() >= self.limit
    }
}
