//! netopt solver engine
//!
//! This crate provides the search over partition trees:
//! - Expander, the resumable cursor over expansion points
//! - Bounders for branch-and-bound pruning
//! - Tabulator with binary and two-pointer searches over precomputed shapes
//! - Exhaustive `Solver` and randomized `LocalSolver`
//! - Termination conditions, events and statistics for local search

pub mod bounder;
pub mod error;
pub mod event;
pub mod expander;
pub mod local;
mod partition;
pub mod scope;
pub mod solution;
pub mod solver;
pub mod stats;
pub mod tabulator;
pub mod termination;

pub use bounder::{ExtremalBounder, NetworkBounder};
pub use error::{Result, SolverError};
pub use event::{CountingEventListener, SolverEventListener, SolverEventSupport};
pub use expander::Expander;
pub use local::{ConfiguredTermination, LocalSolver};
pub use scope::LocalSearchScope;
pub use solution::{Solution, Summary};
pub use solver::Solver;
pub use stats::SolverStats;
pub use tabulator::Tabulator;
pub use termination::{
    AndTermination, BestCostTermination, ExternalTermination, NoTermination, OrTermination,
    RoundCountTermination, Termination, TimeTermination,
};
