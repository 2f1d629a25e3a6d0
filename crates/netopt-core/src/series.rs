//! Element series and named irrational targets.

use std::fmt;
use std::str::FromStr;

use crate::error::NetworkError;
use crate::ratio::{integer, ratio, Ratio};

/// A fixed, ordered catalogue of element values a problem draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Series {
    /// 1, 2, ..., 12
    Int,
    /// 1, 3, ..., 23
    Odd,
    /// 2, 4, ..., 24
    Even,
    /// The E12 preferred-number decade 1.0 .. 8.2
    #[default]
    E12,
    /// Sixteen unit elements
    One,
}

const E12_TENTHS: [i64; 12] = [10, 12, 15, 18, 22, 27, 33, 39, 47, 56, 68, 82];

impl Series {
    /// Number of elements available in this series.
    pub fn len(self) -> usize {
        match self {
            Series::One => 16,
            _ => 12,
        }
    }

    /// Returns the element at `idx`, or `None` past the end.
    pub fn get(self, idx: usize) -> Option<Ratio> {
        if idx >= self.len() {
            return None;
        }
        let i = idx as i64;
        Some(match self {
            Series::Int => integer(i + 1),
            Series::Odd => integer(2 * i + 1),
            Series::Even => integer(2 * i + 2),
            Series::E12 => ratio(E12_TENTHS[idx], 10),
            Series::One => integer(1),
        })
    }

    /// Returns the first `n` elements, or `None` if the series is shorter.
    pub fn take(self, n: usize) -> Option<Vec<Ratio>> {
        (0..n).map(|idx| self.get(idx)).collect()
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Series::Int => write!(f, "INT"),
            Series::Odd => write!(f, "ODD"),
            Series::Even => write!(f, "EVEN"),
            Series::E12 => write!(f, "E12"),
            Series::One => write!(f, "ONE"),
        }
    }
}

impl FromStr for Series {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INT" => Ok(Series::Int),
            "ODD" => Ok(Series::Odd),
            "EVEN" => Ok(Series::Even),
            "E12" => Ok(Series::E12),
            "ONE" => Ok(Series::One),
            _ => Err(NetworkError::UnknownSeries(s.to_string())),
        }
    }
}

/// Irrational constants, approximated to fifteen significant digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedTarget {
    E,
    Pi,
    Phi,
    Sqrt2,
}

const FIFTEEN_DIGITS: i64 = 100_000_000_000_000;

impl NamedTarget {
    pub fn value(self) -> Ratio {
        match self {
            NamedTarget::E => ratio(271_828_182_845_905, FIFTEEN_DIGITS),
            NamedTarget::Pi => ratio(314_159_265_358_979, FIFTEEN_DIGITS),
            NamedTarget::Phi => ratio(161_803_398_874_989, FIFTEEN_DIGITS),
            NamedTarget::Sqrt2 => ratio(141_421_356_237_309, FIFTEEN_DIGITS),
        }
    }
}

impl fmt::Display for NamedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamedTarget::E => write!(f, "E"),
            NamedTarget::Pi => write!(f, "PI"),
            NamedTarget::Phi => write!(f, "PHI"),
            NamedTarget::Sqrt2 => write!(f, "SQRT2"),
        }
    }
}

impl FromStr for NamedTarget {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "E" => Ok(NamedTarget::E),
            "PI" => Ok(NamedTarget::Pi),
            "PHI" => Ok(NamedTarget::Phi),
            "SQRT2" => Ok(NamedTarget::Sqrt2),
            _ => Err(NetworkError::UnknownTarget(s.to_string())),
        }
    }
}
