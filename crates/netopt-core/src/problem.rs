//! The immutable problem definition.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use num_traits::{Signed, Zero};

use crate::coder::MAX_ELEMENTS;
use crate::error::{NetworkError, Result};
use crate::ratio::Ratio;
use crate::series::{NamedTarget, Series};

/// Index of an element within a [`Problem`].
pub type Value = usize;

/// How the achieved total is compared against the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// Approximate the constant directly.
    Named(NamedTarget),
    /// Approximate `sqrt(n)`: the total is squared before comparison.
    Squared(Ratio),
}

impl TargetSpec {
    /// Returns the target value and whether totals are squared.
    pub fn resolve(&self) -> (Ratio, bool) {
        match self {
            TargetSpec::Named(named) => (named.value(), false),
            TargetSpec::Squared(n) => (n.clone(), true),
        }
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSpec::Named(named) => write!(f, "{named}"),
            TargetSpec::Squared(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for TargetSpec {
    type Err = NetworkError;

    /// Parses a named constant (`PI`) or a number (`7`, `5/2`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Ok(named) = s.parse::<NamedTarget>() {
            return Ok(TargetSpec::Named(named));
        }
        s.trim()
            .parse::<Ratio>()
            .map(TargetSpec::Squared)
            .map_err(|_| NetworkError::UnknownTarget(s.to_string()))
    }
}

/// Ordered element values, a target, and the comparison mode.
///
/// The optimizer minimizes `|cost(total)|` where
/// `cost(total) = (squared ? total² : total) - target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    elements: Vec<Ratio>,
    target: Ratio,
    squared: bool,
}

impl Problem {
    /// Creates a problem from explicit element values.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidProblem`] if an element is not strictly
    /// positive, or if there are more elements than a subset mask can address.
    pub fn new(elements: Vec<Ratio>, target: Ratio, squared: bool) -> Result<Self> {
        if elements.len() > MAX_ELEMENTS {
            return Err(NetworkError::InvalidProblem(format!(
                "{} elements exceed the maximum of {}",
                elements.len(),
                MAX_ELEMENTS
            )));
        }
        if let Some((idx, value)) = elements.iter().enumerate().find(|(_, v)| !v.is_positive()) {
            return Err(NetworkError::InvalidProblem(format!(
                "element {idx} is {value}, elements must be strictly positive"
            )));
        }
        Ok(Self {
            elements,
            target,
            squared,
        })
    }

    /// Creates a problem from the first `n` elements of a series.
    pub fn from_series(series: Series, n: usize, target: &TargetSpec) -> Result<Self> {
        let elements = series.take(n).ok_or_else(|| {
            NetworkError::InvalidProblem(format!(
                "series {series} has only {} elements, {n} requested",
                series.len()
            ))
        })?;
        let (target, squared) = target.resolve();
        Self::new(elements, target, squared)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Ratio] {
        &self.elements
    }

    pub fn target(&self) -> &Ratio {
        &self.target
    }

    pub fn is_squared(&self) -> bool {
        self.squared
    }

    /// Indices of every element, in order.
    pub fn values(&self) -> Vec<Value> {
        (0..self.elements.len()).collect()
    }

    /// Signed cost of a total; negative means the total falls short.
    pub fn cost(&self, total: &Ratio) -> Ratio {
        if self.squared {
            total * total - &self.target
        } else {
            total - &self.target
        }
    }

    /// Absolute cost of a total, the quantity every solver minimizes.
    pub fn abs_cost(&self, total: &Ratio) -> Ratio {
        self.cost(total).abs()
    }

    /// Returns true if `total` hits the target exactly.
    pub fn is_exact(&self, total: &Ratio) -> bool {
        self.cost(total).is_zero()
    }
}

impl Index<Value> for Problem {
    type Output = Ratio;

    fn index(&self, idx: Value) -> &Ratio {
        &self.elements[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratio::{integer, ratio};

    #[test]
    fn test_cost_squared() {
        let problem = Problem::from_series(Series::Int, 5, &TargetSpec::Squared(integer(5))).unwrap();
        assert_eq!(problem.len(), 5);
        assert_eq!(problem[4], integer(5));
        assert_eq!(problem.cost(&integer(2)), integer(-1));
        assert_eq!(problem.abs_cost(&integer(2)), integer(1));
        assert!(!problem.is_exact(&integer(5)));
    }

    #[test]
    fn test_cost_linear() {
        let problem = Problem::new(vec![integer(1)], ratio(1, 2), false).unwrap();
        assert_eq!(problem.cost(&integer(1)), ratio(1, 2));
        assert!(problem.is_exact(&ratio(1, 2)));
    }

    #[test]
    fn test_rejects_non_positive_elements() {
        let result = Problem::new(vec![integer(1), integer(0)], integer(1), true);
        assert!(matches!(result, Err(NetworkError::InvalidProblem(_))));
    }

    #[test]
    fn test_rejects_too_many_elements() {
        let elements = vec![integer(1); MAX_ELEMENTS + 1];
        assert!(Problem::new(elements, integer(1), true).is_err());
    }

    #[test]
    fn test_from_series_rejects_overlong() {
        let result = Problem::from_series(Series::Int, 13, &TargetSpec::Squared(integer(13)));
        assert!(matches!(result, Err(NetworkError::InvalidProblem(_))));
    }

    #[test]
    fn test_target_spec_parse() {
        assert_eq!(
            "pi".parse::<TargetSpec>(),
            Ok(TargetSpec::Named(NamedTarget::Pi))
        );
        assert_eq!("7".parse::<TargetSpec>(), Ok(TargetSpec::Squared(integer(7))));
        assert_eq!(
            "5/2".parse::<TargetSpec>(),
            Ok(TargetSpec::Squared(ratio(5, 2)))
        );
        assert!("seven".parse::<TargetSpec>().is_err());
    }

    #[test]
    fn test_named_target_is_linear() {
        let problem = Problem::from_series(Series::E12, 4, &TargetSpec::Named(NamedTarget::E)).unwrap();
        assert!(!problem.is_squared());
        assert_eq!(problem.target(), &NamedTarget::E.value());
    }
}
