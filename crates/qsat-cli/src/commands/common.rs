//! Shared helpers for CLI commands.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qsat_adapter_sim::SimulatorBackend;
use qsat_hal::ExecutionResult;
use qsat_parse::{Format, ParsedCnf, VariableMap};

use crate::config::Config;

/// Input file format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Named literals, one clause per line
    Csv,
    /// DIMACS `p cnf`
    Dimacs,
}

impl From<InputFormat> for Format {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Csv => Format::Csv,
            InputFormat::Dimacs => Format::Dimacs,
        }
    }
}

/// Load a CNF file, detecting the format from the extension or content.
pub fn load_formula(path: &str, format: Option<InputFormat>) -> Result<ParsedCnf> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let parsed = qsat_parse::parse_file(path, format.map(Format::from))
        .with_context(|| format!("Failed to parse {path}"))?;

    if parsed.num_vars() == 0 {
        anyhow::bail!("{path} declares no variables");
    }
    Ok(parsed)
}

/// Create the simulator described by the configuration.
pub fn build_backend(config: &Config) -> SimulatorBackend {
    let backend = SimulatorBackend::with_max_qubits(config.simulator.max_qubits);
    match config.simulator.seed {
        Some(seed) => backend.with_seed(seed),
        None => backend,
    }
}

/// A steady-ticking spinner, hidden when `quiet` is set.
pub fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print measurement counts as a histogram.
pub fn print_results(result: &ExecutionResult) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        result.shots
    );

    let sorted = result.counts.sorted();
    let total = result.counts.total_shots() as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = *count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }

    if let Some(time_ms) = result.execution_time_ms {
        println!("\n  Execution time: {} ms", style(time_ms).yellow());
    }
}

/// Names of the user variables set to true.
pub fn true_variables<'a>(variables: &'a VariableMap, assignment: &[bool]) -> Vec<&'a str> {
    variables
        .user_names()
        .filter(|(index, _)| assignment.get(*index as usize - 1).copied().unwrap_or(false))
        .map(|(_, name)| name)
        .collect()
}

/// Map every user variable name to its value.
pub fn assignment_json(variables: &VariableMap, assignment: &[bool]) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = variables
        .user_names()
        .map(|(index, name)| {
            let value = assignment.get(index as usize - 1).copied().unwrap_or(false);
            (name.to_string(), serde_json::Value::Bool(value))
        })
        .collect();
    serde_json::Value::Object(map)
}
