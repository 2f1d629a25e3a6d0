//! Shared test fixtures for netopt crates.
//!
//! - [`problems`] - integer-series problems with squared targets
//! - [`networks`] - literal tree builders using 1-based element numbers
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! netopt-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use netopt_test::{integer_problem, n, nt};
//!
//! let problem = integer_problem(5);
//! let network = n().child(nt(&[1])).child(nt(&[2, 3]));
//! ```

pub mod networks;
pub mod problems;

pub use networks::{n, nt};
pub use problems::integer_problem;
