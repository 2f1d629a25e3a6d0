//! netopt - exact series/parallel network optimization
//!
//! Combine a fixed set of elements through alternating series and parallel
//! levels so the reduced value lands as close as possible to a target.
//!
//! # Example
//!
//! ```rust
//! use netopt::prelude::*;
//!
//! let problem =
//!     Problem::from_series(Series::Int, 4, &TargetSpec::Squared(integer(4))).unwrap();
//! let solution = Solver::new().with_bounder(ExtremalBounder).solve(&problem);
//! assert_eq!(solution.cost, integer(0));
//! assert_eq!(solution.network.to_infix(&problem, false), "(1|4)+(2|3)");
//! ```

pub use netopt_config::{
    BounderType, ConfigError, ExhaustiveConfig, LocalSearchConfig, ProblemConfig, SolverConfig,
    SolverStrategy, TargetConfig, TerminationConfig,
};
pub use netopt_core::{
    integer, ratio, BoundMode, NamedTarget, NetworkError, NetworkEvaluator, Node, Problem, Ratio,
    Series, TargetSpec,
};
pub use netopt_solver::{
    termination, ExtremalBounder, LocalSolver, NetworkBounder, Solution, Solver, SolverError,
    SolverEventListener, Summary, Tabulator,
};

#[cfg(feature = "console")]
pub mod console;

mod run;
pub use run::{run_problem, run_solver};

pub mod prelude {
    pub use super::{integer, ratio, NamedTarget, Node, Problem, Ratio, Series, TargetSpec};
    pub use super::{ExtremalBounder, LocalSolver, Solution, Solver, Summary, Tabulator};
    pub use super::{run_solver, SolverConfig, SolverStrategy};
}
