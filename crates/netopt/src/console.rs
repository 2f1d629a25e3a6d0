//! Colorful console output for solver events.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//!
//! ## Log Levels
//!
//! - **WARN**: local search started without any termination limit
//! - **INFO**: solve start and end, local search improvements
//! - **DEBUG**: exhaustive incumbent changes, tabulation, finished rounds
//! - **TRACE**: individual probes and hill-climbing steps
//!
//! The filter defaults to `netopt_solver=info` and honors `RUST_LOG`.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "netopt_solver=info,netopt=info";

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call has effect. Does
/// nothing if another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("netopt") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{output}");
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    solver: Option<String>,
    strategy: Option<String>,
    cost: Option<String>,
    best_cost: Option<String>,
    target: Option<String>,
    elements: Option<u64>,
    nodes: Option<u64>,
    prunes: Option<u64>,
    tabulated_searches: Option<u64>,
    tabulation_arity: Option<u64>,
    subsets: Option<u64>,
    shapes: Option<u64>,
    round: Option<u64>,
    rounds: Option<u64>,
    groups: Option<u64>,
    improvements: Option<u64>,
    duration_ms: Option<u64>,
    elapsed_ms: Option<u64>,
    bounder: Option<bool>,
    terminated_early: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{value:?}").trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "solver" => self.solver = Some(s),
            "strategy" => self.strategy = Some(s),
            "cost" => self.cost = Some(s),
            "best_cost" => self.best_cost = Some(s),
            "target" => self.target = Some(s),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "solver" => self.solver = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "elements" => self.elements = Some(value),
            "nodes" => self.nodes = Some(value),
            "prunes" => self.prunes = Some(value),
            "tabulated_searches" => self.tabulated_searches = Some(value),
            "tabulation_arity" | "arity" => self.tabulation_arity = Some(value),
            "subsets" => self.subsets = Some(value),
            "shapes" => self.shapes = Some(value),
            "round" => self.round = Some(value),
            "rounds" => self.rounds = Some(value),
            "groups" => self.groups = Some(value),
            "improvements" => self.improvements = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "bounder" => self.bounder = Some(value),
            "terminated_early" => self.terminated_early = Some(value),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "run" => format_run(v),
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "new_best" => format_new_best(v),
        "tabulated" => format_tabulated(v),
        "round_end" => format_round_end(v),
        "unbounded" => format_unbounded(v),
        "probe" | "improve_step" if level == Level::TRACE => format_trace(v),
        _ => String::new(),
    }
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

fn format_run(v: &EventVisitor) -> String {
    format!(
        "{} {} │ {} elements │ target {}",
        "●".bright_cyan(),
        v.strategy.as_deref().unwrap_or("?").white().bold(),
        count(v.elements).bright_yellow(),
        v.target.as_deref().unwrap_or("?").bright_yellow(),
    )
}

fn format_solve_start(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} Solving {} │ {} elements",
        "▶".bright_green().bold(),
        v.solver.as_deref().unwrap_or("").white().bold(),
        count(v.elements).bright_yellow(),
    );
    if let Some(arity) = v.tabulation_arity.filter(|&a| a > 0) {
        output.push_str(&format!(" │ tabulation {}", arity.bright_magenta()));
    }
    if v.bounder == Some(true) {
        output.push_str(&format!(" │ {}", "bounded".bright_magenta()));
    }
    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} Solving complete │ {} │ cost {}",
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.cost.as_deref().unwrap_or("N/A").bright_green().bold(),
    );
    if v.nodes.is_some() {
        output.push_str(&format!(
            " │ {} nodes │ {} pruned │ {} tabulated",
            count(v.nodes).white(),
            count(v.prunes).white(),
            count(v.tabulated_searches).white(),
        ));
    }
    if v.rounds.is_some() {
        output.push_str(&format!(
            " │ {} rounds │ {} improvements",
            count(v.rounds).white(),
            count(v.improvements).white(),
        ));
    }
    if v.terminated_early == Some(true) {
        output.push_str(&format!(" │ {}", "terminated early".bright_red()));
    }
    output
}

fn format_new_best(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} New best │ cost {}",
        "★".bright_yellow().bold(),
        v.cost.as_deref().unwrap_or("N/A").bright_green(),
    );
    if let Some(round) = v.round {
        output.push_str(&format!(" │ round {}", round.to_formatted_string(&Locale::en)));
    }
    if let Some(nodes) = v.nodes {
        output.push_str(&format!(" │ {} nodes", nodes.to_formatted_string(&Locale::en)));
    }
    if let Some(ms) = v.elapsed_ms {
        output.push_str(&format!(" │ {}", format_duration_ms(ms).yellow()));
    }
    output
}

fn format_tabulated(v: &EventVisitor) -> String {
    format!(
        "{} Tabulated │ {} subsets │ {} shapes",
        "▦".bright_blue(),
        count(v.subsets).white(),
        count(v.shapes).white(),
    )
}

fn format_round_end(v: &EventVisitor) -> String {
    format!(
        "{} Round {} │ {} groups │ cost {}",
        "↻".bright_black(),
        count(v.round).bright_black(),
        count(v.groups).bright_black(),
        v.cost.as_deref().unwrap_or("N/A").bright_black(),
    )
}

fn format_unbounded(v: &EventVisitor) -> String {
    format!(
        "{} {} has no termination limit │ stop it with the early-termination flag",
        "⚠".bright_yellow().bold(),
        v.strategy.as_deref().unwrap_or("solver").white().bold(),
    )
}

fn format_trace(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} │ cost {}",
        "·".bright_black(),
        v.event.as_deref().unwrap_or("").bright_black(),
        v.cost.as_deref().unwrap_or("N/A").bright_black(),
    );
    if let Some(best) = v.best_cost.as_deref() {
        output.push_str(&format!(" │ best {}", best.bright_black()));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let visitor = EventVisitor {
            event: Some("something_else".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_empty());
    }

    #[test]
    fn test_trace_events_need_trace_level() {
        let visitor = EventVisitor {
            event: Some("probe".to_string()),
            cost: Some("1/2".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor, Level::DEBUG).is_empty());
        assert!(format_event(&visitor, Level::TRACE).contains("1/2"));
    }

    #[test]
    fn test_solve_end_counts() {
        let visitor = EventVisitor {
            event: Some("solve_end".to_string()),
            cost: Some("5/81".to_string()),
            nodes: Some(12_345),
            prunes: Some(10),
            tabulated_searches: Some(0),
            duration_ms: Some(12),
            ..EventVisitor::default()
        };
        let output = format_event(&visitor, Level::INFO);
        assert!(output.contains("5/81"));
        assert!(output.contains("12,345"));
        assert!(!output.contains("rounds"));
    }

    #[test]
    fn test_unbounded_warning() {
        let visitor = EventVisitor {
            event: Some("unbounded".to_string()),
            strategy: Some("LocalSearch".to_string()),
            ..EventVisitor::default()
        };
        let output = format_event(&visitor, Level::WARN);
        assert!(output.contains("LocalSearch"));
        assert!(output.contains("no termination limit"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
