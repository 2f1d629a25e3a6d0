//! Exact rational arithmetic.
//!
//! Every value the optimizer compares is a [`Ratio`] backed by arbitrary
//! precision integers, so pruning decisions never depend on rounding.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

/// Exact rational number used for element values, totals and costs.
pub type Ratio = BigRational;

/// Builds `numer / denom` in lowest terms.
///
/// # Panics
///
/// Panics if `denom` is zero.
pub fn ratio(numer: i64, denom: i64) -> Ratio {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Builds the integer `n` as a ratio.
pub fn integer(n: i64) -> Ratio {
    BigRational::from_integer(BigInt::from(n))
}

/// Lossy conversion for reports; returns NaN if either part overflows `f64`.
pub fn to_f64(value: &Ratio) -> f64 {
    match (value.numer().to_f64(), value.denom().to_f64()) {
        (Some(numer), Some(denom)) => numer / denom,
        _ => f64::NAN,
    }
}
