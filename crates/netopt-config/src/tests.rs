//! Tests for solver configuration.

use super::*;
use netopt_core::{integer, ratio};

#[test]
fn test_toml_parsing() {
    let toml = r#"
        strategy = "local_search"
        random_seed = 42

        [problem]
        series = "E12"
        size = 8
        target = "PI"

        [local_search]
        tabulation_arity = 4

        [termination]
        seconds_spent_limit = 30
        round_limit = 1000
        best_cost_limit = "1/1000"
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.strategy, SolverStrategy::LocalSearch);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.local_search.tabulation_arity, 4);
    let termination = config.termination.clone().unwrap();
    assert_eq!(termination.seconds_spent_limit, Some(30));
    assert_eq!(termination.round_limit, Some(1000));
    assert_eq!(termination.best_cost_limit().unwrap(), Some(ratio(1, 1000)));

    let problem = config.to_problem().unwrap().unwrap();
    assert_eq!(problem.len(), 8);
    assert!(!problem.is_squared());
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        random_seed: 7
        problem:
          series: INT
          size: 5
          target: 5
        exhaustive:
          bounder: none
          tabulation_arity: 3
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.strategy, SolverStrategy::Exhaustive);
    assert_eq!(config.exhaustive.bounder, BounderType::None);
    assert_eq!(config.exhaustive.tabulation_arity, 3);
    assert_eq!(
        config.problem.as_ref().unwrap().target,
        TargetConfig::Number(5)
    );

    let problem = config.to_problem().unwrap().unwrap();
    assert!(problem.is_squared());
    assert_eq!(problem.target(), &integer(5));
}

#[test]
fn test_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config.strategy, SolverStrategy::Exhaustive);
    assert_eq!(config.exhaustive.bounder, BounderType::Extremal);
    assert_eq!(config.exhaustive.tabulation_arity, 0);
    assert_eq!(config.local_search.tabulation_arity, 3);
    assert!(config.termination.is_none());
    assert!(config.to_problem().unwrap().is_none());
    assert_eq!(config.time_limit(), None);
}

#[test]
fn test_default_series() {
    let config = SolverConfig::from_toml_str(
        r#"
        [problem]
        size = 4
        target = "E"
    "#,
    )
    .unwrap();
    assert_eq!(config.problem.as_ref().unwrap().series, "E12");
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_strategy(SolverStrategy::LocalSearch)
        .with_problem(ProblemConfig::new("INT", 6, TargetConfig::Number(6)))
        .with_random_seed(123)
        .with_bounder(BounderType::None)
        .with_tabulation_arity(2)
        .with_termination_seconds(60)
        .with_round_limit(10);

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.exhaustive.tabulation_arity, 2);
    assert_eq!(config.local_search.tabulation_arity, 2);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(config.termination.as_ref().unwrap().round_limit, Some(10));
    assert!(config.validate().is_ok());
}

#[test]
fn test_termination_time_limit() {
    let termination = TerminationConfig {
        seconds_spent_limit: Some(30),
        minutes_spent_limit: Some(2),
        ..Default::default()
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_secs(150)));
    assert!(!termination.is_unbounded());
    assert!(TerminationConfig::default().is_unbounded());
}

#[test]
fn test_validate_rejects_local_search_without_tabulation() {
    let config = SolverConfig::new()
        .with_strategy(SolverStrategy::LocalSearch)
        .with_tabulation_arity(0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_oversize_arity() {
    let config = SolverConfig::new().with_tabulation_arity(MAX_TABULATION_ARITY + 1);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_bad_problem() {
    let unknown_series =
        SolverConfig::new().with_problem(ProblemConfig::new("E24", 4, TargetConfig::Number(4)));
    assert!(unknown_series.validate().is_err());

    let unknown_target = SolverConfig::new().with_problem(ProblemConfig::new(
        "INT",
        4,
        TargetConfig::Name("TAU".to_string()),
    ));
    assert!(unknown_target.validate().is_err());

    let too_large =
        SolverConfig::new().with_problem(ProblemConfig::new("INT", 13, TargetConfig::Number(13)));
    assert!(too_large.validate().is_err());
}

#[test]
fn test_validate_rejects_bad_cost_limit() {
    let config = SolverConfig::from_toml_str(
        r#"
        [termination]
        best_cost_limit = "small"
    "#,
    )
    .unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_load_missing_file() {
    let result = SolverConfig::load("/nonexistent/netopt.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
