//! Problem fixtures.

use netopt_core::{integer, Problem, Series, TargetSpec};

/// The first `size` integers approximating `sqrt(size)`.
///
/// This is the model behind the known optimum table:
/// sizes 2..=7 have optimal costs 14/9, 3/4, 0, 5/81, 278/178929, 1/2304.
///
/// # Panics
///
/// Panics if `size` exceeds the integer series.
pub fn integer_problem(size: usize) -> Problem {
    let target = TargetSpec::Squared(integer(size as i64));
    Problem::from_series(Series::Int, size, &target)
        .unwrap_or_else(|err| panic!("integer problem of size {size}: {err}"))
}
