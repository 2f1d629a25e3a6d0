//! Configuration system for netopt.
//!
//! Load solver configuration from TOML or YAML to choose the problem, the
//! search strategy, pruning and tabulation, and termination without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use netopt_config::{BounderType, SolverConfig, SolverStrategy};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     strategy = "exhaustive"
//!
//!     [problem]
//!     series = "INT"
//!     size = 7
//!     target = 7
//!
//!     [exhaustive]
//!     bounder = "extremal"
//!     tabulation_arity = 3
//!
//!     [termination]
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.strategy, SolverStrategy::Exhaustive);
//! assert_eq!(config.exhaustive.bounder, BounderType::Extremal);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.to_problem().unwrap().unwrap().len(), 7);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use netopt_config::SolverConfig;
//!
//! let config = SolverConfig::load("netopt.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use netopt_core::{Problem, Ratio, Series, TargetSpec, MAX_ELEMENTS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest tabulation arity a subset mask can key.
pub const MAX_TABULATION_ARITY: usize = MAX_ELEMENTS;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Which solver runs.
    #[serde(default)]
    pub strategy: SolverStrategy,

    /// Random seed for reproducible local search.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Problem to solve, when not supplied in code.
    #[serde(default)]
    pub problem: Option<ProblemConfig>,

    /// Branch-and-bound settings.
    #[serde(default)]
    pub exhaustive: ExhaustiveConfig,

    /// Randomized restart settings.
    #[serde(default)]
    pub local_search: LocalSearchConfig,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the solver strategy.
    pub fn with_strategy(mut self, strategy: SolverStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the problem.
    pub fn with_problem(mut self, problem: ProblemConfig) -> Self {
        self.problem = Some(problem);
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the bounder used by the exhaustive solver.
    pub fn with_bounder(mut self, bounder: BounderType) -> Self {
        self.exhaustive.bounder = bounder;
        self
    }

    /// Sets the tabulation arity of both strategies.
    pub fn with_tabulation_arity(mut self, arity: usize) -> Self {
        self.exhaustive.tabulation_arity = arity;
        self.local_search.tabulation_arity = arity;
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the local search round limit.
    pub fn with_round_limit(mut self, rounds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            round_limit: Some(rounds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Builds the configured problem, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unknown series or target, or a
    /// size the series cannot supply.
    pub fn to_problem(&self) -> Result<Option<Problem>, ConfigError> {
        self.problem.as_ref().map(ProblemConfig::to_problem).transpose()
    }

    /// Checks every setting that can be checked without solving.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exhaustive.tabulation_arity > MAX_TABULATION_ARITY {
            return Err(ConfigError::Invalid(format!(
                "exhaustive tabulation_arity {} exceeds {}",
                self.exhaustive.tabulation_arity, MAX_TABULATION_ARITY
            )));
        }
        if self.strategy == SolverStrategy::LocalSearch {
            let arity = self.local_search.tabulation_arity;
            if arity == 0 || arity > MAX_TABULATION_ARITY {
                return Err(ConfigError::Invalid(format!(
                    "local search needs a tabulation_arity in 1..={MAX_TABULATION_ARITY}, got {arity}"
                )));
            }
        }
        if let Some(termination) = &self.termination {
            termination.best_cost_limit()?;
        }
        self.to_problem()?;
        Ok(())
    }
}

/// Search strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverStrategy {
    /// Branch and bound over every partition; exact.
    #[default]
    Exhaustive,

    /// Randomized restarts with hill climbing; anytime.
    LocalSearch,
}

/// Problem definition by series name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProblemConfig {
    /// Element series: `INT`, `ODD`, `EVEN`, `E12` or `ONE`.
    #[serde(default = "default_series")]
    pub series: String,

    /// Number of leading series elements to use.
    pub size: usize,

    /// Named constant (`E`, `PI`, `PHI`, `SQRT2`) or a number whose square
    /// root is approximated.
    pub target: TargetConfig,
}

fn default_series() -> String {
    Series::default().to_string()
}

impl ProblemConfig {
    pub fn new(series: impl Into<String>, size: usize, target: TargetConfig) -> Self {
        Self {
            series: series.into(),
            size,
            target,
        }
    }

    /// Builds the problem.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the series, target or size is
    /// rejected.
    pub fn to_problem(&self) -> Result<Problem, ConfigError> {
        let series: Series = self
            .series
            .parse()
            .map_err(|err| ConfigError::Invalid(format!("{err}")))?;
        let target: TargetSpec = self
            .target
            .to_string()
            .parse()
            .map_err(|err| ConfigError::Invalid(format!("{err}")))?;
        Problem::from_series(series, self.size, &target)
            .map_err(|err| ConfigError::Invalid(format!("{err}")))
    }
}

/// A target written either as a bare number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TargetConfig {
    Number(u64),
    Name(String),
}

impl fmt::Display for TargetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetConfig::Number(n) => write!(f, "{n}"),
            TargetConfig::Name(name) => write!(f, "{name}"),
        }
    }
}

/// Exhaustive solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExhaustiveConfig {
    /// Pruning bound.
    #[serde(default)]
    pub bounder: BounderType,

    /// Largest subset size precomputed for tabulated search; 0 disables it.
    #[serde(default)]
    pub tabulation_arity: usize,
}

/// Pruning bound types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BounderType {
    /// No pruning.
    None,

    /// All-series and all-parallel extremes of the partial network.
    #[default]
    Extremal,
}

/// Local search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// Largest subset routed to a tabulated subtree; must be at least 1.
    #[serde(default = "default_local_arity")]
    pub tabulation_arity: usize,
}

fn default_local_arity() -> usize {
    3
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            tabulation_arity: default_local_arity(),
        }
    }
}

/// Termination configuration.
///
/// Only the local search consults it; the exhaustive solver always runs to
/// completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,

    /// Maximum number of restart rounds.
    pub round_limit: Option<u64>,

    /// Stop once the best cost is at most this value, e.g. `"0"` or `"1/2304"`.
    pub best_cost_limit: Option<String>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }

    /// Parses the best cost limit, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the limit is not a rational.
    pub fn best_cost_limit(&self) -> Result<Option<Ratio>, ConfigError> {
        self.best_cost_limit
            .as_deref()
            .map(|s| {
                s.trim().parse::<Ratio>().map_err(|_| {
                    ConfigError::Invalid(format!("best_cost_limit {s:?} is not a rational"))
                })
            })
            .transpose()
    }

    /// Returns true if no limit is set.
    pub fn is_unbounded(&self) -> bool {
        self.time_limit().is_none() && self.round_limit.is_none() && self.best_cost_limit.is_none()
    }
}

#[cfg(test)]
mod tests;
