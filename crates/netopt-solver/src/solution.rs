//! Solver results and the textual report.

use std::fmt;

use netopt_core::{to_f64, BoundMode, NetworkEvaluator, Node, Problem, Ratio};

/// The best network a solver found, with its exact total and cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub network: Node,
    /// Exact reduced value of `network`.
    pub total: Ratio,
    /// `|cost(total)|` against the problem's target.
    pub cost: Ratio,
}

impl Solution {
    /// Evaluates `network` against `problem`.
    pub fn evaluate(problem: &Problem, network: Node) -> Self {
        let total = NetworkEvaluator::evaluate_total(problem, &network, BoundMode::Exact);
        let cost = problem.abs_cost(&total);
        Self {
            network,
            total,
            cost,
        }
    }

    /// Returns the report for this solution.
    pub fn summary<'a>(&'a self, problem: &'a Problem) -> Summary<'a> {
        Summary::new(problem, &self.network)
    }
}

/// Five-line report of a network against a problem.
///
/// ```text
/// Solution: (1|4)+(2|3)
///  Network: N()[N({0,3})][N({1,2})]
///   Target: 2
///    Total: 2 (2)
///     Cost: 0
/// ```
///
/// For squared problems the target line shows `sqrt(target)` and the cost
/// line shows `total - sqrt(target)`, so both read in units of the total.
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a> {
    problem: &'a Problem,
    network: &'a Node,
    prefix: &'a str,
}

impl<'a> Summary<'a> {
    pub fn new(problem: &'a Problem, network: &'a Node) -> Self {
        Self {
            problem,
            network,
            prefix: "",
        }
    }

    /// Prepends `prefix` to every line, e.g. `"% "` for LaTeX comments.
    pub fn with_prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = prefix;
        self
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = NetworkEvaluator::evaluate_total(self.problem, self.network, BoundMode::Exact);
        let mut target = to_f64(self.problem.target());
        let mut cost = to_f64(&self.problem.cost(&total));
        if self.problem.is_squared() {
            target = target.sqrt();
            cost = to_f64(&total) - target;
        }
        let prefix = self.prefix;
        writeln!(f, "{prefix}Solution: {}", self.network.to_infix(self.problem, false))?;
        writeln!(f, "{prefix} Network: {}", self.network.to_network())?;
        writeln!(f, "{prefix}  Target: {}", significant(target, 16))?;
        writeln!(
            f,
            "{prefix}   Total: {} ({total})",
            significant(to_f64(&total), 16)
        )?;
        writeln!(f, "{prefix}    Cost: {}", significant(cost, 4))
    }
}

/// Formats `value` with at most `digits` significant digits, dropping
/// trailing zeros and switching to exponent form for very small or large
/// magnitudes.
fn significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let digits = digits.max(1);
    let exponent = value.abs().log10().floor() as i32;
    if exponent < -5 || exponent >= digits as i32 {
        return format!("{:.*e}", digits - 1, value);
    }
    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
