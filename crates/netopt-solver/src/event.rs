//! Event hooks for monitoring local search progress.
//!
//! Listeners are called synchronously, in registration order, from the
//! solving thread.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use netopt_solver::event::{SolverEventListener, SolverEventSupport};
//! use netopt_solver::Solution;
//!
//! #[derive(Debug)]
//! struct PrintListener;
//!
//! impl SolverEventListener for PrintListener {
//!     fn on_best_solution_changed(&self, solution: &Solution, round: u64) {
//!         println!("round {round}: cost {}", solution.cost);
//!     }
//! }
//!
//! let mut support = SolverEventSupport::new();
//! support.add_listener(Arc::new(PrintListener));
//! assert_eq!(support.listener_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::solution::Solution;

/// Receives solver lifecycle notifications.
pub trait SolverEventListener: Send + Sync + Debug {
    /// Called when a round produces a new global best.
    fn on_best_solution_changed(&self, solution: &Solution, round: u64);

    /// Called once before the first round.
    fn on_solving_started(&self) {}

    /// Called once with the final best solution.
    fn on_solving_ended(&self, _solution: &Solution, _is_terminated_early: bool) {}
}

/// Registered listeners and event dispatch.
#[derive(Debug, Default, Clone)]
pub struct SolverEventSupport {
    listeners: Vec<Arc<dyn SolverEventListener>>,
}

impl SolverEventSupport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn SolverEventListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn fire_best_solution_changed(&self, solution: &Solution, round: u64) {
        for listener in &self.listeners {
            listener.on_best_solution_changed(solution, round);
        }
    }

    pub fn fire_solving_started(&self) {
        for listener in &self.listeners {
            listener.on_solving_started();
        }
    }

    pub fn fire_solving_ended(&self, solution: &Solution, is_terminated_early: bool) {
        for listener in &self.listeners {
            listener.on_solving_ended(solution, is_terminated_early);
        }
    }
}

/// Listener that counts the events it receives.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    best_solution_changed_count: AtomicU64,
    solving_started_count: AtomicU64,
    solving_ended_count: AtomicU64,
}

impl CountingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best_solution_changed_count(&self) -> u64 {
        self.best_solution_changed_count.load(Ordering::SeqCst)
    }

    pub fn solving_started_count(&self) -> u64 {
        self.solving_started_count.load(Ordering::SeqCst)
    }

    pub fn solving_ended_count(&self) -> u64 {
        self.solving_ended_count.load(Ordering::SeqCst)
    }
}

impl SolverEventListener for CountingEventListener {
    fn on_best_solution_changed(&self, _solution: &Solution, _round: u64) {
        self.best_solution_changed_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_started(&self) {
        self.solving_started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_ended(&self, _solution: &Solution, _is_terminated_early: bool) {
        self.solving_ended_count.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netopt_test::{integer_problem, nt};

    #[test]
    fn test_dispatch_reaches_every_listener() {
        let first = Arc::new(CountingEventListener::new());
        let second = Arc::new(CountingEventListener::new());
        let mut support = SolverEventSupport::new();
        support.add_listener(first.clone());
        support.add_listener(second.clone());

        let problem = integer_problem(2);
        let solution = Solution::evaluate(&problem, nt(&[1, 2]));
        support.fire_solving_started();
        support.fire_best_solution_changed(&solution, 1);
        support.fire_best_solution_changed(&solution, 2);
        support.fire_solving_ended(&solution, false);

        for listener in [&first, &second] {
            assert_eq!(listener.solving_started_count(), 1);
            assert_eq!(listener.best_solution_changed_count(), 2);
            assert_eq!(listener.solving_ended_count(), 1);
        }
    }

    #[test]
    fn test_clear_listeners() {
        let mut support = SolverEventSupport::new();
        support.add_listener(Arc::new(CountingEventListener::new()));
        support.clear_listeners();
        assert_eq!(support.listener_count(), 0);
    }
}
