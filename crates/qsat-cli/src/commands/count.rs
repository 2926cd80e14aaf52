//! Count command implementation.

use anyhow::Result;
use console::style;
use serde_json::json;

use crate::config::Config;
use crate::controller::Controller;

use super::common::{InputFormat, build_backend, load_formula, print_results, spinner};

/// Execute the count command.
pub fn execute(
    input: &str,
    format: Option<InputFormat>,
    precision: Option<u32>,
    json: bool,
    config: &Config,
) -> Result<()> {
    let cnf = load_formula(input, format)?;
    let precision = precision.unwrap_or(config.counting.precision);
    if precision == 0 {
        anyhow::bail!("--precision must be at least 1");
    }

    if !json {
        println!(
            "{} Counting solutions of {} ({} variables, {} clauses, {} counting qubits)",
            style("→").cyan().bold(),
            style(input).green(),
            cnf.num_vars(),
            cnf.formula.num_clauses(),
            precision
        );
    }

    let backend = build_backend(config);
    let progress = spinner("Counting...", json);
    let controller = Controller::new(&backend, config).with_progress(progress.clone());
    let report = controller.count(&cnf.formula, cnf.num_vars(), precision);
    progress.finish_and_clear();
    let report = report?;

    if json {
        let out = json!({
            "input": input,
            "num_vars": cnf.num_vars(),
            "num_clauses": cnf.formula.num_clauses(),
            "count": report,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_results(&report.result);
    println!(
        "\n  Register value: {}  θ = {:.4}",
        style(report.estimate.register_value).yellow(),
        report.estimate.theta
    );
    println!(
        "  Estimated solutions: {} ({:.3})",
        style(report.rounded).green().bold(),
        report.estimate.solutions
    );
    Ok(())
}
