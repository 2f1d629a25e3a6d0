//! Termination conditions for local search.
//!
//! Checked once after every round, so a round in progress always finishes.

mod best_cost;
mod composite;
mod external;
mod round_count;
mod time;

use std::fmt::Debug;

use crate::scope::LocalSearchScope;

pub use best_cost::BestCostTermination;
pub use composite::{AndTermination, OrTermination};
pub use external::ExternalTermination;
pub use round_count::RoundCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop solving.
pub trait Termination: Send + Debug {
    /// Returns true if solving should terminate.
    fn is_terminated(&self, scope: &LocalSearchScope) -> bool;
}

/// An absent termination never fires.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, scope: &LocalSearchScope) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(scope))
    }
}

/// Never terminates; the run stops only on an early-termination request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl Termination for NoTermination {
    fn is_terminated(&self, _scope: &LocalSearchScope) -> bool {
        false
    }
}
