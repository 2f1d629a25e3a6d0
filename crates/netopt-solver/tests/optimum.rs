//! End-to-end optimum table for the integer series.
//!
//! The first `n` integers approximating `sqrt(n)` have known optimal
//! costs. Pruning and tabulation must find the same optimum as the plain
//! enumeration.

use netopt_core::{ratio, BoundMode, NetworkEvaluator, Ratio};
use netopt_solver::{ExtremalBounder, Solver, Tabulator};
use netopt_test::integer_problem;

fn optimum(size: usize) -> Ratio {
    match size {
        2 => ratio(14, 9),
        3 => ratio(3, 4),
        4 => ratio(0, 1),
        5 => ratio(5, 81),
        6 => ratio(278, 178929),
        7 => ratio(1, 2304),
        _ => unreachable!("no known optimum for size {size}"),
    }
}

fn check_all_sizes(solve: impl Fn(usize) -> netopt_solver::Solution) {
    for size in 2..=7 {
        let problem = integer_problem(size);
        let solution = solve(size);
        assert_eq!(solution.cost, optimum(size), "size {size}");
        assert_eq!(
            NetworkEvaluator::evaluate_cost(&problem, &solution.network, BoundMode::Exact),
            solution.cost,
            "size {size}"
        );
    }
}

#[test]
fn test_plain_enumeration() {
    check_all_sizes(|size| Solver::new().solve(&integer_problem(size)));
}

#[test]
fn test_with_bounder() {
    check_all_sizes(|size| {
        Solver::new()
            .with_bounder(ExtremalBounder)
            .solve(&integer_problem(size))
    });
}

#[test]
fn test_with_bounder_and_unit_tabulation() {
    check_all_sizes(|size| {
        Solver::new()
            .with_bounder(ExtremalBounder)
            .with_tabulator(Tabulator::new(1).unwrap())
            .solve(&integer_problem(size))
    });
}

#[test]
fn test_with_bounder_and_tabulation() {
    check_all_sizes(|size| {
        Solver::new()
            .with_bounder(ExtremalBounder)
            .with_tabulator(Tabulator::new(3).unwrap())
            .solve(&integer_problem(size))
    });
}

#[test]
fn test_with_tabulation_only() {
    check_all_sizes(|size| {
        Solver::new()
            .with_tabulator(Tabulator::new(2).unwrap())
            .solve(&integer_problem(size))
    });
}

#[test]
fn test_known_networks() {
    let mut solver = Solver::new().with_bounder(ExtremalBounder);
    let networks: Vec<String> = (2..=5)
        .map(|size| solver.solve(&integer_problem(size)).network.to_network())
        .collect();
    assert_eq!(
        networks,
        vec![
            "N()[N({0,1})]",
            "N()[N(2)[N({0,1})]]",
            "N()[N({0,3})][N({1,2})]",
            "N()[N()[N(0)][N({2,4})]][N({1,3})]",
        ]
    );
}
