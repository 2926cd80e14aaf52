//! Solve command implementation.

use anyhow::Result;
use console::style;
use serde_json::json;

use crate::config::Config;
use crate::controller::{Controller, SolveOutcome};

use super::common::{
    InputFormat, assignment_json, build_backend, load_formula, print_results, spinner,
    true_variables,
};

/// Execute the solve command.
pub fn execute(
    input: &str,
    format: Option<InputFormat>,
    json: bool,
    config: &Config,
) -> Result<()> {
    let mut cnf = load_formula(input, format)?;

    if !json {
        println!(
            "{} Solving {} ({} variables, {} clauses)",
            style("→").cyan().bold(),
            style(input).green(),
            cnf.num_vars(),
            cnf.formula.num_clauses()
        );
    }

    let backend = build_backend(config);
    let progress = spinner("Counting...", json);
    let controller = Controller::new(&backend, config).with_progress(progress.clone());
    let outcome = controller.solve(&mut cnf);
    progress.finish_and_clear();
    let outcome = outcome?;

    if json {
        let assignment = match &outcome {
            SolveOutcome::Solved { search, .. } => {
                Some(assignment_json(&cnf.variables, &search.assignment))
            }
            _ => None,
        };
        let out = json!({
            "input": input,
            "outcome": outcome,
            "assignment": assignment,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        match &outcome {
            SolveOutcome::Solved {
                estimate,
                padding,
                search,
                attempts,
            } => {
                println!(
                    "  Estimated solutions: {} (register {})",
                    style(estimate.rounded()).yellow(),
                    estimate.register_value
                );
                if *padding > 0 {
                    println!("  Padding variables: {padding}");
                }
                print_results(&search.result);
                println!(
                    "\n{} Satisfying assignment found after {} attempt(s) ({} iterations)",
                    style("✓").green().bold(),
                    attempts.len(),
                    search.iterations
                );
                let names = true_variables(&cnf.variables, &search.assignment);
                if names.is_empty() {
                    println!("  All variables false");
                } else {
                    println!("  True variables: {}", style(names.join(", ")).cyan());
                }
            }
            SolveOutcome::NoSolutionsExpected { estimate, .. } => {
                println!(
                    "\n{} No solutions expected (estimate {:.3})",
                    style("✗").yellow().bold(),
                    estimate.solutions
                );
            }
            SolveOutcome::Unverified { attempts, .. } => {
                println!(
                    "\n{} No candidate satisfied the formula (iterations tried: {:?})",
                    style("✗").red().bold(),
                    attempts
                );
            }
        }
    }

    if let SolveOutcome::Unverified { attempts, .. } = outcome {
        anyhow::bail!("search failed after {} attempts", attempts.len());
    }
    Ok(())
}
