//! Inspect command implementation.

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;

use qsat_core::{RegisterLayout, compile_count, compile_search};
use qsat_ir::{Circuit, QubitId};

use crate::config::Config;

use super::common::{InputFormat, load_formula};

/// Which circuit to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CircuitKind {
    /// Grover search circuit
    Search,
    /// Quantum counting circuit
    Count,
}

/// Execute the inspect command.
pub fn execute(
    input: &str,
    format: Option<InputFormat>,
    kind: CircuitKind,
    iterations: usize,
    precision: Option<u32>,
    emit_json: Option<&str>,
    config: &Config,
) -> Result<()> {
    let cnf = load_formula(input, format)?;
    let num_vars = cnf.num_vars();
    let num_clauses = cnf.formula.num_clauses() as u32;

    let (circuit, layout) = match kind {
        CircuitKind::Search => (
            compile_search(&cnf.formula, num_vars, iterations)?,
            RegisterLayout::search(num_vars, num_clauses),
        ),
        CircuitKind::Count => {
            let precision = precision.unwrap_or(config.counting.precision);
            (
                compile_count(&cnf.formula, num_vars, precision)?,
                RegisterLayout::counting(num_vars, num_clauses, precision),
            )
        }
    };

    println!(
        "{} {} ({} variables, {} clauses)",
        style("→").cyan().bold(),
        style(input).green(),
        num_vars,
        num_clauses
    );
    println!("  Formula: {}", cnf.formula);

    println!("\n{}", style("Register layout:").bold());
    if layout.precision > 0 {
        println!("  count   {}", range(&layout.counting_qubits()));
    }
    println!("  inputs  {}", range(&layout.inputs()));
    println!("  flag    {}", layout.flag());
    if num_clauses > 0 {
        println!("  clauses {}", range(&layout.ancillas()));
    }

    print_summary(&circuit);

    if let Some(path) = emit_json {
        let json = serde_json::to_string_pretty(&circuit)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {path}"))?;
        println!("\n  Circuit written to {}", style(path).green());
    }

    Ok(())
}

fn print_summary(circuit: &Circuit) {
    println!("\n{} {}", style("Circuit:").bold(), circuit.name());
    println!("  Qubits: {}", circuit.num_qubits());
    println!("  Operations: {}", circuit.num_ops());
    println!("  Depth: {}", circuit.depth());

    let mut counts: Vec<_> = circuit.gate_counts().into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    println!("  Gates:");
    for (name, count) in counts {
        println!("    {:<8} {:>8}", style(name).cyan(), count);
    }
}

/// Format a contiguous qubit range as `qa..=qb`.
fn range(qubits: &[QubitId]) -> String {
    match (qubits.first(), qubits.last()) {
        (Some(first), Some(last)) if first == last => format!("{first}"),
        (Some(first), Some(last)) => format!("{first}..={last}"),
        _ => "(none)".to_string(),
    }
}
