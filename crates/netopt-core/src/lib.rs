//! netopt core - problem definition and partition trees
//!
//! This crate provides the data model for series/parallel network search:
//! - Exact rational arithmetic and the built-in element series
//! - The immutable `Problem` and its cost function
//! - The partition tree with owned and shared closed children
//! - Exact and bounding evaluation of a tree
//! - Subset bitmask coding used for tabulation keys and bipartitions

pub mod coder;
pub mod error;
pub mod evaluator;
pub mod node;
pub mod problem;
pub mod ratio;
mod render;
pub mod series;

pub use coder::{Mask, SubsetCoder, MAX_ELEMENTS};
pub use error::{NetworkError, Result};
pub use evaluator::{BoundMode, NetworkEvaluator, Operator};
pub use node::{Child, ClosedNode, Node, NodePath};
pub use problem::{Problem, TargetSpec, Value};
pub use ratio::{integer, ratio, to_f64, Ratio};
pub use series::{NamedTarget, Series};
