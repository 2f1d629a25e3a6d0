//! Configuration-driven entry points.

use netopt_config::{SolverConfig, SolverStrategy, TerminationConfig};
use netopt_core::Problem;
use netopt_solver::{LocalSolver, Result, Solution, Solver, SolverError};
use tracing::{info, warn};

/// Validates `config`, builds its problem and solves it with the
/// configured strategy.
///
/// A local search without any termination limit runs until the process
/// is stopped.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or names no problem.
pub fn run_solver(config: &SolverConfig) -> Result<(Problem, Solution)> {
    config.validate()?;
    let problem = config.to_problem()?.ok_or(SolverError::MissingProblem)?;
    let solution = run_problem(&problem, config)?;
    Ok((problem, solution))
}

/// Solves `problem` with the strategy and settings of `config`, ignoring
/// any problem the configuration names.
///
/// # Errors
///
/// Returns an error if the solver settings are invalid.
pub fn run_problem(problem: &Problem, config: &SolverConfig) -> Result<Solution> {
    info!(
        event = "run",
        strategy = ?config.strategy,
        elements = problem.len(),
        target = %problem.target(),
    );
    let solution = match config.strategy {
        SolverStrategy::Exhaustive => Solver::from_config(&config.exhaustive)?.solve(problem),
        SolverStrategy::LocalSearch => {
            let mut solver = LocalSolver::from_config(config)?;
            if is_unbounded(config) {
                warn!(event = "unbounded", strategy = ?config.strategy);
            }
            solver.solve(problem)
        }
    };
    Ok(solution)
}

/// Returns true if a local search under `config` has no termination limit.
fn is_unbounded(config: &SolverConfig) -> bool {
    config
        .termination
        .as_ref()
        .map_or(true, TerminationConfig::is_unbounded)
}
