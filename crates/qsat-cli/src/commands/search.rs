//! Search command implementation.

use anyhow::Result;
use console::style;
use serde_json::json;

use crate::config::Config;
use crate::controller::Controller;

use super::common::{
    InputFormat, assignment_json, build_backend, load_formula, print_results, spinner,
    true_variables,
};

/// Execute the search command.
pub fn execute(
    input: &str,
    format: Option<InputFormat>,
    iterations: usize,
    json: bool,
    config: &Config,
) -> Result<()> {
    let cnf = load_formula(input, format)?;

    if !json {
        println!(
            "{} Searching {} with {} Grover iterations ({} shots)",
            style("→").cyan().bold(),
            style(input).green(),
            iterations,
            config.search.shots
        );
    }

    let backend = build_backend(config);
    let progress = spinner("Searching...", json);
    let controller = Controller::new(&backend, config).with_progress(progress.clone());
    let report = controller.search(&cnf.formula, cnf.num_vars(), iterations);
    progress.finish_and_clear();
    let report = report?;

    if json {
        let out = json!({
            "input": input,
            "search": report,
            "assignment": assignment_json(&cnf.variables, &report.assignment),
            "counts": report.result.counts,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_results(&report.result);
    let verdict = if report.satisfied {
        style("satisfies").green().bold()
    } else {
        style("does not satisfy").red().bold()
    };
    println!(
        "\n  Most frequent: {} {} the formula",
        style(&report.candidate).cyan(),
        verdict
    );
    if report.satisfied {
        println!(
            "  True variables: {}",
            true_variables(&cnf.variables, &report.assignment).join(", ")
        );
    }
    Ok(())
}
