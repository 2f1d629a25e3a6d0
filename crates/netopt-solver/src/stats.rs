//! Solver statistics.

use std::time::{Duration, Instant};

/// Counters for one solve run.
///
/// # Example
///
/// ```
/// use netopt_solver::stats::SolverStats;
///
/// let mut stats = SolverStats::default();
/// stats.start();
/// stats.record_node();
/// stats.record_node();
/// stats.record_prune();
///
/// assert_eq!(stats.nodes_explored, 2);
/// assert_eq!(stats.prunes, 1);
/// assert_eq!(stats.prune_rate(), 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolverStats {
    start_time: Option<Instant>,
    /// Search nodes entered, pruned ones included.
    pub nodes_explored: u64,
    /// Search nodes cut off by the bounder.
    pub prunes: u64,
    /// Binary and linear searches answered from the lookup table.
    pub tabulated_searches: u64,
    /// Fully resolved networks evaluated.
    pub terminal_evaluations: u64,
    /// Times the best network was replaced.
    pub improvements: u64,
    /// Local search restarts.
    pub rounds: u64,
}

impl SolverStats {
    /// Resets every counter and marks the start of solving.
    pub fn start(&mut self) {
        *self = Self {
            start_time: Some(Instant::now()),
            ..Self::default()
        };
    }

    /// Returns the elapsed time since solving started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn record_node(&mut self) {
        self.nodes_explored += 1;
    }

    pub fn record_prune(&mut self) {
        self.prunes += 1;
    }

    pub fn record_tabulated_search(&mut self) {
        self.tabulated_searches += 1;
    }

    pub fn record_terminal(&mut self) {
        self.terminal_evaluations += 1;
    }

    pub fn record_improvement(&mut self) {
        self.improvements += 1;
    }

    pub fn record_round(&mut self) {
        self.rounds += 1;
    }

    /// Fraction of explored nodes that were pruned.
    pub fn prune_rate(&self) -> f64 {
        if self.nodes_explored == 0 {
            0.0
        } else {
            self.prunes as f64 / self.nodes_explored as f64
        }
    }

    /// Returns the explored nodes per second rate.
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.nodes_explored as f64 / secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_resets_counters() {
        let mut stats = SolverStats::default();
        stats.record_round();
        stats.record_improvement();
        stats.start();
        assert_eq!(stats.rounds, 0);
        assert_eq!(stats.improvements, 0);
        assert!(stats.start_time.is_some());
    }

    #[test]
    fn test_rates_without_work() {
        let stats = SolverStats::default();
        assert_eq!(stats.elapsed(), Duration::ZERO);
        assert_eq!(stats.prune_rate(), 0.0);
        assert_eq!(stats.nodes_per_second(), 0.0);
    }
}
