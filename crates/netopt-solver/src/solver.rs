//! Exhaustive branch-and-bound solver.

use netopt_config::{BounderType, ExhaustiveConfig};
use netopt_core::{BoundMode, Child, Mask, NetworkEvaluator, Node, Problem};
use tracing::{debug, info};

use crate::bounder::{ExtremalBounder, NetworkBounder};
use crate::error::Result;
use crate::expander::Expander;
use crate::partition::Bipartition;
use crate::solution::Solution;
use crate::stats::SolverStats;
use crate::tabulator::Tabulator;

/// Finds the optimal network by enumerating every canonical partition.
///
/// The search mutates a single tree in place and undoes every change
/// before returning from a branch. An optional bounder prunes branches
/// that cannot beat the incumbent, and an optional tabulator resolves the
/// last one or two open subsets from precomputed shapes.
///
/// Neither collaborator changes the optimum cost found, only the time
/// taken to find it.
///
/// # Example
///
/// ```
/// use netopt_core::{integer, Problem, Series, TargetSpec};
/// use netopt_solver::{ExtremalBounder, Solver, Tabulator};
///
/// let problem =
///     Problem::from_series(Series::Int, 4, &TargetSpec::Squared(integer(4))).unwrap();
/// let mut solver = Solver::new()
///     .with_bounder(ExtremalBounder)
///     .with_tabulator(Tabulator::new(2).unwrap());
/// let solution = solver.solve(&problem);
/// assert_eq!(solution.cost, integer(0));
/// ```
#[derive(Debug)]
pub struct Solver<B = ExtremalBounder> {
    bounder: Option<B>,
    tabulator: Option<Tabulator>,
    stats: SolverStats,
}

impl Solver<ExtremalBounder> {
    /// Creates a solver with neither pruning nor tabulation.
    pub fn new() -> Self {
        Self {
            bounder: None,
            tabulator: None,
            stats: SolverStats::default(),
        }
    }

    /// Builds a solver from its configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the tabulation arity is out of range.
    pub fn from_config(config: &ExhaustiveConfig) -> Result<Self> {
        let mut solver = Self::new();
        if config.bounder == BounderType::Extremal {
            solver.bounder = Some(ExtremalBounder);
        }
        if config.tabulation_arity > 0 {
            solver.tabulator = Some(Tabulator::new(config.tabulation_arity)?);
        }
        Ok(solver)
    }
}

impl Default for Solver<ExtremalBounder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: NetworkBounder> Solver<B> {
    /// Enables pruning with `bounder`.
    pub fn with_bounder<B2: NetworkBounder>(self, bounder: B2) -> Solver<B2> {
        Solver {
            bounder: Some(bounder),
            tabulator: self.tabulator,
            stats: self.stats,
        }
    }

    /// Enables tabulated search; the table is rebuilt on every solve.
    pub fn with_tabulator(mut self, tabulator: Tabulator) -> Self {
        self.tabulator = Some(tabulator);
        self
    }

    pub fn bounder(&self) -> Option<&B> {
        self.bounder.as_ref()
    }

    pub fn tabulator(&self) -> Option<&Tabulator> {
        self.tabulator.as_ref()
    }

    /// Statistics of the most recent solve.
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Returns an optimal network for `problem`.
    pub fn solve(&mut self, problem: &Problem) -> Solution {
        self.stats.start();
        info!(
            event = "solve_start",
            solver = "exhaustive",
            elements = problem.len(),
            bounder = self.bounder.is_some(),
            tabulation_arity = self.tabulator.as_ref().map_or(0, Tabulator::arity),
        );
        if let Some(tabulator) = self.tabulator.as_mut() {
            tabulator.tabulate(problem);
        }

        let mut network = Node::from_values(problem.values());
        let mut search = Search {
            problem,
            bounder: self.bounder.as_ref(),
            tabulator: self.tabulator.as_ref(),
            stats: &mut self.stats,
            best: None,
        };
        search.explore(&mut network);
        let best = search.best.take();
        let solution = best.unwrap_or_else(|| Solution::evaluate(problem, network));

        info!(
            event = "solve_end",
            solver = "exhaustive",
            cost = %solution.cost,
            nodes = self.stats.nodes_explored,
            prunes = self.stats.prunes,
            tabulated_searches = self.stats.tabulated_searches,
            duration_ms = self.stats.elapsed().as_millis() as u64,
        );
        solution
    }
}

/// State of one recursive search.
struct Search<'a, B> {
    problem: &'a Problem,
    bounder: Option<&'a B>,
    tabulator: Option<&'a Tabulator>,
    stats: &'a mut SolverStats,
    best: Option<Solution>,
}

impl<B: NetworkBounder> Search<'_, B> {
    fn explore(&mut self, network: &mut Node) {
        self.stats.record_node();
        if let (Some(bounder), Some(best)) = (self.bounder, self.best.as_ref()) {
            if bounder.bound(self.problem, network) >= best.cost {
                self.stats.record_prune();
                return;
            }
        }

        let mut expander = Expander::new();
        let Some(path_0) = expander.expandable(network) else {
            self.evaluate_terminal(network);
            return;
        };
        let path_1 = expander.expandable(network);
        let path_2 = match path_1 {
            Some(_) => expander.expandable(network),
            None => None,
        };

        let values_0 = std::mem::take(&mut network.node_at_mut(&path_0).values);
        match (self.tabulator, &path_1, &path_2) {
            (Some(tabulator), None, _) if tabulator.covers(values_0.len()) => {
                self.stats.record_tabulated_search();
                let node = tabulator.binary_search(self.problem, network, &path_0, &values_0);
                network.node_at_mut(&path_0).children.push(Child::Closed(node));
                self.explore(network);
                network.node_at_mut(&path_0).children.pop();
            }
            (Some(tabulator), Some(path_1), None)
                if tabulator.covers(values_0.len())
                    && tabulator.covers(network.node_at(path_1).values.len()) =>
            {
                self.stats.record_tabulated_search();
                let values_1 = std::mem::take(&mut network.node_at_mut(path_1).values);
                let (node_0, node_1) = tabulator.linear_search(
                    self.problem,
                    network,
                    &path_0,
                    path_1,
                    &values_0,
                    &values_1,
                );
                network.node_at_mut(&path_0).children.push(Child::Closed(node_0));
                network.node_at_mut(path_1).children.push(Child::Closed(node_1));
                self.explore(network);
                network.node_at_mut(path_1).children.pop();
                network.node_at_mut(&path_0).children.pop();
                network.node_at_mut(path_1).values = values_1;
            }
            _ => {
                let split = Bipartition::begin(network, &path_0, &values_0);
                for mask in 0..split.count() {
                    if split.apply(network, mask as Mask) {
                        self.explore(network);
                    }
                }
                split.finish(network);
            }
        }
        network.node_at_mut(&path_0).values = values_0;
    }

    /// Records a fully resolved network if it strictly beats the incumbent.
    fn evaluate_terminal(&mut self, network: &Node) {
        self.stats.record_terminal();
        let total = NetworkEvaluator::evaluate_total(self.problem, network, BoundMode::Exact);
        let cost = self.problem.abs_cost(&total);
        if self.best.as_ref().is_some_and(|best| best.cost <= cost) {
            return;
        }
        self.stats.record_improvement();
        debug!(
            event = "new_best",
            cost = %cost,
            nodes = self.stats.nodes_explored,
        );
        self.best = Some(Solution {
            network: network.clone(),
            total,
            cost,
        });
    }
}
