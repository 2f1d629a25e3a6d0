//! Local search scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use netopt_core::Ratio;

/// Progress of one local search run, as seen by terminations.
#[derive(Debug, Clone)]
pub struct LocalSearchScope {
    start_time: Instant,
    round_count: u64,
    best_cost: Option<Ratio>,
    terminate_early_flag: Arc<AtomicBool>,
}

impl LocalSearchScope {
    pub fn new(terminate_early_flag: Arc<AtomicBool>) -> Self {
        Self {
            start_time: Instant::now(),
            round_count: 0,
            best_cost: None,
            terminate_early_flag,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Completed rounds.
    pub fn round_count(&self) -> u64 {
        self.round_count
    }

    pub fn increment_round_count(&mut self) -> u64 {
        self.round_count += 1;
        self.round_count
    }

    pub fn best_cost(&self) -> Option<&Ratio> {
        self.best_cost.as_ref()
    }

    pub fn set_best_cost(&mut self, cost: Ratio) {
        self.best_cost = Some(cost);
    }

    /// Returns true if early termination was requested.
    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag.load(Ordering::SeqCst)
    }
}

impl Default for LocalSearchScope {
    fn default() -> Self {
        Self::new(Arc::new(AtomicBool::new(false)))
    }
}
