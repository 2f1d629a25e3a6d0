//! Textual forms of a partition tree.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::evaluator::Operator;
use crate::node::{Child, Node};
use crate::problem::Problem;
use crate::ratio::{integer, Ratio};

fn write_op(out: &mut String, op: Operator, mathmode: bool) {
    match op {
        Operator::Series if mathmode => out.push_str("$+$"),
        _ => out.push(op.symbol()),
    }
}

/// Element value truncated to one decimal place: `4.7`, `12`.
fn write_element(out: &mut String, value: &Ratio) {
    let tenths = (value * integer(10)).to_integer();
    let ten = BigInt::from(10);
    let whole = &tenths / &ten;
    let frac = &tenths % &ten;
    out.push_str(&whole.to_string());
    if !frac.is_zero() {
        out.push('.');
        out.push_str(&frac.to_string());
    }
}

impl Node {
    /// Infix expression of the tree, `+` for series and `|` for parallel.
    ///
    /// Nested groups of more than one term are parenthesized. Math mode
    /// writes series as `$+$` for LaTeX.
    pub fn to_infix(&self, problem: &Problem, mathmode: bool) -> String {
        let mut out = String::new();
        self.write_infix(&mut out, problem, mathmode, true, Operator::Series);
        out
    }

    fn write_infix(
        &self,
        out: &mut String,
        problem: &Problem,
        mathmode: bool,
        top: bool,
        op: Operator,
    ) {
        let grouped = !top && self.values.len() + self.children.len() > 1;
        if grouped {
            out.push('(');
        }
        let subtop = top && self.values.is_empty() && self.children.len() == 1;
        for (idx, child) in self.children.iter().enumerate() {
            if idx > 0 {
                write_op(out, op, mathmode);
            }
            match child {
                Child::Closed(closed) => {
                    closed
                        .node
                        .write_infix(out, problem, mathmode, subtop, Operator::Series)
                }
                Child::Owned(node) => node.write_infix(out, problem, mathmode, subtop, op.flip()),
            }
        }
        if !self.values.is_empty() && !self.children.is_empty() {
            write_op(out, op, mathmode);
        }
        for (idx, &value) in self.values.iter().enumerate() {
            if idx > 0 {
                write_op(out, op, mathmode);
            }
            write_element(out, &problem[value]);
        }
        if grouped {
            out.push(')');
        }
    }

    /// Structural dump in the `N(..)[..]` form used by test fixtures.
    ///
    /// Values print as zero-based indices, braced when there are several.
    /// A closed child restarts from series, so under a series parent it is
    /// wrapped in an extra `N()[..]` level to keep the alternation readable.
    pub fn to_network(&self) -> String {
        let mut out = String::new();
        self.write_network(&mut out, Operator::Series);
        out
    }

    fn write_network(&self, out: &mut String, op: Operator) {
        out.push_str("N(");
        let braced = self.values.len() > 1;
        if braced {
            out.push('{');
        }
        let values: Vec<String> = self.values.iter().map(ToString::to_string).collect();
        out.push_str(&values.join(","));
        if braced {
            out.push('}');
        }
        out.push(')');
        for child in &self.children {
            out.push('[');
            match child {
                Child::Closed(closed) if op == Operator::Series => {
                    out.push_str("N()[");
                    closed.node.write_network(out, Operator::Series);
                    out.push(']');
                }
                Child::Closed(closed) => closed.node.write_network(out, Operator::Series),
                Child::Owned(node) => node.write_network(out, op.flip()),
            }
            out.push(']');
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::node::{ClosedNode, Node};
    use crate::problem::{Problem, TargetSpec, Value};
    use crate::ratio::{integer, ratio};
    use crate::series::Series;

    fn problem(n: usize) -> Problem {
        Problem::from_series(Series::Int, n, &TargetSpec::Squared(integer(n as i64))).unwrap()
    }

    fn nt(values: &[Value]) -> Node {
        Node::from_values(values.iter().map(|v| v - 1))
    }

    #[test]
    fn test_infix_series_of_parallel() {
        let problem = problem(5);
        let node = Node::new()
            .child(nt(&[1]))
            .child(Node::new().child(nt(&[2])).child(nt(&[3])).child(nt(&[4])))
            .child(nt(&[5]));
        assert_eq!(node.to_infix(&problem, false), "1+(2|3|4)+5");
        assert_eq!(node.to_infix(&problem, true), "1$+$(2|3|4)$+$5");
        assert_eq!(node.to_network(), "N()[N(0)][N()[N(1)][N(2)][N(3)]][N(4)]");
    }

    #[test]
    fn test_infix_single_child_root() {
        let problem = problem(7);
        let node = Node::new().child(
            Node::new()
                .child(Node::new().child(nt(&[3])).child(nt(&[7])))
                .child(Node::new().child(nt(&[1])).child(nt(&[2])).child(nt(&[5])))
                .child(Node::new().child(nt(&[4])).child(nt(&[6]))),
        );
        assert_eq!(node.to_infix(&problem, false), "(3+7)|(1+2+5)|(4+6)");
    }

    #[test]
    fn test_network_and_leafify() {
        let mut node = Node::new()
            .child(nt(&[1, 3]))
            .child(nt(&[7]).child(nt(&[6]).child(nt(&[2, 5]))).child(nt(&[4])));
        assert_eq!(node.to_network(), "N()[N({0,2})][N(6)[N(5)[N({1,4})]][N(3)]]");
        node.leafify();
        assert_eq!(
            node.to_network(),
            "N()[N()[N(0)][N(2)]][N()[N()[N()[N(1)][N(4)]][N(5)]][N(3)][N(6)]]"
        );
    }

    #[test]
    fn test_infix_decimal_elements() {
        let problem = Problem::from_series(Series::E12, 3, &TargetSpec::Squared(integer(2))).unwrap();
        let node = nt(&[1, 2, 3]);
        assert_eq!(node.to_infix(&problem, false), "1+1.2+1.5");
    }

    #[test]
    fn test_closed_child_restarts_from_series() {
        let problem = problem(3);
        let closed = Arc::new(ClosedNode::new(
            ratio(2, 3),
            Node::new().child(Node::new().child(nt(&[1])).child(nt(&[2]))),
        ));
        let series_parent = Node::new().closed_child(Arc::clone(&closed)).child(nt(&[3]));
        assert_eq!(series_parent.to_network(), "N()[N()[N()[N()[N(0)][N(1)]]]][N(2)]");
        assert_eq!(series_parent.to_infix(&problem, false), "(1|2)+3");

        let parallel_parent = Node::new().child(Node::new().closed_child(closed).child(nt(&[3])));
        assert_eq!(parallel_parent.to_network(), "N()[N()[N()[N()[N(0)][N(1)]]][N(2)]]");
        assert_eq!(parallel_parent.to_infix(&problem, false), "(1|2)|3");
    }
}
