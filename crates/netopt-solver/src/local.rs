//! Randomized restart search with tabulated hill climbing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use netopt_config::{SolverConfig, TerminationConfig};
use netopt_core::{BoundMode, Child, NetworkEvaluator, Node, NodePath, Problem};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::error::Result;
use crate::event::{SolverEventListener, SolverEventSupport};
use crate::scope::LocalSearchScope;
use crate::solution::Solution;
use crate::stats::SolverStats;
use crate::tabulator::Tabulator;
use crate::termination::{
    BestCostTermination, NoTermination, OrTermination, RoundCountTermination, Termination,
    TimeTermination,
};

/// Termination assembled from a [`TerminationConfig`].
pub type ConfiguredTermination = OrTermination<(
    Option<TimeTermination>,
    Option<RoundCountTermination>,
    Option<BestCostTermination>,
)>;

/// Anytime heuristic for problems too large for exhaustive search.
///
/// Each round shuffles the elements, routes them down a random tree until
/// every leaf group fits the tabulator, attaches a random tabulated shape
/// to each group, then hill-climbs by re-choosing one or two groups'
/// shapes at a time until no choice improves the cost. The best network
/// over all rounds is kept.
///
/// Terminations are checked after every round, so at least one round
/// always runs.
///
/// # Example
///
/// ```
/// use netopt_core::{integer, Problem, Series, TargetSpec};
/// use netopt_solver::termination::RoundCountTermination;
/// use netopt_solver::{LocalSolver, Tabulator};
///
/// let problem =
///     Problem::from_series(Series::Int, 4, &TargetSpec::Squared(integer(4))).unwrap();
/// let mut solver = LocalSolver::new(Tabulator::new(4).unwrap())
///     .with_termination(RoundCountTermination::new(1))
///     .with_seed(7);
/// assert_eq!(solver.solve(&problem).cost, integer(0));
/// ```
#[derive(Debug)]
pub struct LocalSolver<T = NoTermination> {
    tabulator: Tabulator,
    termination: T,
    rng: StdRng,
    terminate_early_flag: Arc<AtomicBool>,
    solving: Arc<AtomicBool>,
    events: SolverEventSupport,
    stats: SolverStats,
}

impl LocalSolver<NoTermination> {
    /// Creates a solver that runs until terminated early.
    pub fn new(tabulator: Tabulator) -> Self {
        Self {
            tabulator,
            termination: NoTermination,
            rng: StdRng::from_os_rng(),
            terminate_early_flag: Arc::new(AtomicBool::new(false)),
            solving: Arc::new(AtomicBool::new(false)),
            events: SolverEventSupport::new(),
            stats: SolverStats::default(),
        }
    }
}

impl LocalSolver<ConfiguredTermination> {
    /// Builds a solver from the local search, seed and termination
    /// settings of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tabulation arity is out of range or the
    /// best cost limit does not parse.
    pub fn from_config(config: &SolverConfig) -> Result<Self> {
        let tabulator = Tabulator::new(config.local_search.tabulation_arity)?;
        let termination = configured_termination(config.termination.as_ref())?;
        let solver = LocalSolver::new(tabulator).with_termination(termination);
        Ok(match config.random_seed {
            Some(seed) => solver.with_seed(seed),
            None => solver,
        })
    }
}

fn configured_termination(config: Option<&TerminationConfig>) -> Result<ConfiguredTermination> {
    let Some(config) = config else {
        return Ok(OrTermination((None, None, None)));
    };
    Ok(OrTermination((
        config.time_limit().map(TimeTermination::new),
        config.round_limit.map(RoundCountTermination::new),
        config.best_cost_limit()?.map(BestCostTermination::new),
    )))
}

impl<T: Termination> LocalSolver<T> {
    /// Replaces the termination condition.
    pub fn with_termination<T2: Termination>(self, termination: T2) -> LocalSolver<T2> {
        LocalSolver {
            tabulator: self.tabulator,
            termination,
            rng: self.rng,
            terminate_early_flag: self.terminate_early_flag,
            solving: self.solving,
            events: self.events,
            stats: self.stats,
        }
    }

    /// Seeds the random generator for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Registers a listener for best-solution changes.
    pub fn with_listener(mut self, listener: Arc<dyn SolverEventListener>) -> Self {
        self.events.add_listener(listener);
        self
    }

    pub fn tabulator(&self) -> &Tabulator {
        &self.tabulator
    }

    /// Statistics of the most recent solve.
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Requests that solving stop after the current round.
    ///
    /// Returns false, and has no effect, if the solver is not solving.
    /// Since [`solve`](Self::solve) borrows the solver mutably, a running
    /// solve is stopped from a listener or another thread through the
    /// shared [`terminate_early_flag`](Self::terminate_early_flag) instead.
    pub fn terminate_early(&self) -> bool {
        if self.solving.load(Ordering::SeqCst) {
            self.terminate_early_flag.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    /// Flag another thread or a listener can set to stop solving after
    /// the current round. It is cleared when solving starts.
    pub fn terminate_early_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.terminate_early_flag)
    }

    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    /// Returns the best network found before termination.
    pub fn solve(&mut self, problem: &Problem) -> Solution {
        self.solving.store(true, Ordering::SeqCst);
        self.terminate_early_flag.store(false, Ordering::SeqCst);
        self.stats.start();
        info!(
            event = "solve_start",
            solver = "local_search",
            elements = problem.len(),
            tabulation_arity = self.tabulator.arity(),
        );
        self.events.fire_solving_started();

        if problem.is_empty() {
            let solution = Solution::evaluate(problem, Node::new());
            self.finish(&solution, false);
            return solution;
        }
        self.tabulator.tabulate(problem);

        let mut scope = LocalSearchScope::new(Arc::clone(&self.terminate_early_flag));
        let mut best = self.round(problem);
        let round = scope.increment_round_count();
        self.improve_best(&mut scope, &best, round);
        while !scope.is_terminate_early() && !self.termination.is_terminated(&scope) {
            let candidate = self.round(problem);
            let round = scope.increment_round_count();
            if candidate.cost < best.cost {
                self.improve_best(&mut scope, &candidate, round);
                best = candidate;
            }
        }

        let terminated_early = scope.is_terminate_early();
        self.finish(&best, terminated_early);
        best
    }

    fn improve_best(&mut self, scope: &mut LocalSearchScope, solution: &Solution, round: u64) {
        self.stats.record_improvement();
        scope.set_best_cost(solution.cost.clone());
        info!(
            event = "new_best",
            round,
            cost = %solution.cost,
            elapsed_ms = self.stats.elapsed().as_millis() as u64,
        );
        self.events.fire_best_solution_changed(solution, round);
    }

    fn finish(&mut self, solution: &Solution, terminated_early: bool) {
        self.solving.store(false, Ordering::SeqCst);
        info!(
            event = "solve_end",
            solver = "local_search",
            cost = %solution.cost,
            rounds = self.stats.rounds,
            improvements = self.stats.improvements,
            terminated_early,
            duration_ms = self.stats.elapsed().as_millis() as u64,
        );
        self.events.fire_solving_ended(solution, terminated_early);
    }

    /// Builds one random network and climbs to a local optimum.
    fn round(&mut self, problem: &Problem) -> Solution {
        self.stats.record_round();
        let mut values = problem.values();
        values.shuffle(&mut self.rng);
        let mut network = Node::from_values(values);
        let mut expandables = Vec::new();
        self.randomly_expand(&mut network, &mut NodePath::new(), &mut expandables);
        debug_assert_eq!(network.placed_count(), problem.len());
        self.iteratively_improve(problem, &mut network, &expandables);
        let solution = Solution::evaluate(problem, network);
        debug!(
            event = "round_end",
            round = self.stats.rounds,
            groups = expandables.len(),
            cost = %solution.cost,
        );
        solution
    }

    /// Distributes the values of `node` over random children until every
    /// group fits the tabulator, then attaches a random tabulated shape to
    /// each group and records its path.
    fn randomly_expand(
        &mut self,
        node: &mut Node,
        path: &mut NodePath,
        expandables: &mut Vec<NodePath>,
    ) {
        if self.tabulator.covers(node.values.len()) {
            node.hidden = std::mem::take(&mut node.values);
            let entry = self.tabulator.candidates(&node.hidden);
            let idx = self.rng.random_range(0..entry.len());
            node.children.push(Child::Closed(Arc::clone(&entry[idx])));
            expandables.push(path.clone());
            return;
        }
        for value in std::mem::take(&mut node.values) {
            let idx = self.rng.random_range(0..=node.children.len());
            if idx == node.children.len() {
                node.children.push(Child::Owned(Node::new()));
            }
            if let Some(child) = node.children[idx].as_owned_mut() {
                child.values.push(value);
            }
        }
        for (idx, child) in node.children.iter_mut().enumerate() {
            if let Child::Owned(child) = child {
                path.push(idx);
                self.randomly_expand(child, path, expandables);
                path.pop();
            }
        }
    }

    /// Re-chooses the shapes of one or two random groups while that
    /// strictly lowers the cost. The first non-improving choice is undone.
    fn iteratively_improve(
        &mut self,
        problem: &Problem,
        network: &mut Node,
        expandables: &[NodePath],
    ) {
        let mut best_cost = NetworkEvaluator::evaluate_cost(problem, network, BoundMode::Exact);
        loop {
            let idx_0 = self.rng.random_range(0..expandables.len());
            let idx_1 = self.rng.random_range(0..expandables.len());
            let path_0 = &expandables[idx_0];
            let hidden_0 = network.node_at(path_0).hidden.clone();
            let previous_0 = network.node_at_mut(path_0).children.pop();

            let previous_1 = if idx_0 == idx_1 {
                let node = self.tabulator.binary_search(problem, network, path_0, &hidden_0);
                network.node_at_mut(path_0).children.push(Child::Closed(node));
                None
            } else {
                let path_1 = &expandables[idx_1];
                let hidden_1 = network.node_at(path_1).hidden.clone();
                let previous_1 = network.node_at_mut(path_1).children.pop();
                let (node_0, node_1) = self
                    .tabulator
                    .linear_search(problem, network, path_0, path_1, &hidden_0, &hidden_1);
                network.node_at_mut(path_0).children.push(Child::Closed(node_0));
                network.node_at_mut(path_1).children.push(Child::Closed(node_1));
                previous_1.map(|child| (path_1, child))
            };
            self.stats.record_tabulated_search();

            let cost = NetworkEvaluator::evaluate_cost(problem, network, BoundMode::Exact);
            trace!(event = "improve_step", cost = %cost, best_cost = %best_cost);
            if cost >= best_cost {
                restore(network, path_0, previous_0);
                if let Some((path_1, child)) = previous_1 {
                    restore(network, path_1, Some(child));
                }
                break;
            }
            best_cost = cost;
        }
    }
}

/// Puts back the shape a group held before a rejected step.
fn restore(network: &mut Node, path: &[usize], previous: Option<Child>) {
    let node = network.node_at_mut(path);
    node.children.pop();
    node.children.extend(previous);
}
