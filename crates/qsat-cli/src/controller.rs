//! Adaptive count-then-search driver.
//!
//! The controller estimates the number of solutions with quantum counting,
//! picks a Grover iteration count from the estimate, searches, and checks
//! the decoded candidate classically.

use anyhow::{Context, Result, bail};
use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{debug, info, warn};

use qsat_core::{
    CountEstimate, Formula, RegisterLayout, compile_count, compile_search, optimal_iterations,
};
use qsat_hal::{Backend, ExecutionResult};
use qsat_parse::ParsedCnf;

use crate::config::Config;

/// Outcome of a counting run.
#[derive(Debug, Clone, Serialize)]
pub struct CountReport {
    pub precision: u32,
    pub estimate: CountEstimate,
    pub rounded: u64,
    #[serde(skip)]
    pub result: ExecutionResult,
}

/// Outcome of a single search run.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub iterations: usize,
    pub candidate: String,
    pub assignment: Vec<bool>,
    pub satisfied: bool,
    #[serde(skip)]
    pub result: ExecutionResult,
}

/// Final state of the solve loop.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SolveOutcome {
    /// A candidate satisfied the formula.
    Solved {
        estimate: CountEstimate,
        padding: u32,
        search: SearchReport,
        attempts: Vec<usize>,
    },
    /// Counting estimated zero solutions.
    NoSolutionsExpected { estimate: CountEstimate, padding: u32 },
    /// No search attempt produced a satisfying assignment.
    Unverified {
        estimate: CountEstimate,
        padding: u32,
        attempts: Vec<usize>,
    },
}

/// Turn a measured bitstring into an assignment (character `i` is variable `i + 1`).
pub fn decode_assignment(bits: &str) -> Result<Vec<bool>> {
    bits.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => bail!("unexpected character '{other}' in bitstring '{bits}'"),
        })
        .collect()
}

/// Drives counting and search against a backend.
pub struct Controller<'a> {
    backend: &'a dyn Backend,
    config: &'a Config,
    progress: ProgressBar,
}

impl<'a> Controller<'a> {
    /// Create a controller without progress output.
    pub fn new(backend: &'a dyn Backend, config: &'a Config) -> Self {
        Self {
            backend,
            config,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report progress on `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Estimate the number of solutions with `precision` counting qubits.
    pub fn count(&self, formula: &Formula, num_vars: u32, precision: u32) -> Result<CountReport> {
        self.progress.set_message(format!(
            "Counting ({num_vars} variables, {precision} counting qubits)..."
        ));

        let circuit = compile_count(formula, num_vars, precision)
            .context("Failed to build counting circuit")?;
        let layout = RegisterLayout::counting(num_vars, formula.num_clauses() as u32, precision);
        debug!(
            qubits = circuit.num_qubits(),
            ops = circuit.num_ops(),
            "Compiled counting circuit"
        );

        let result = self
            .backend
            .simulate(&circuit, 0, &layout.counting_qubits(), self.config.counting.shots)
            .context("Counting run failed")?;
        let (bits, _) = result
            .counts
            .most_frequent()
            .context("Counting run returned no shots")?;
        let estimate = CountEstimate::from_bitstring(bits, num_vars)
            .with_context(|| format!("Invalid counting bitstring '{bits}'"))?;

        info!(
            register = estimate.register_value,
            solutions = estimate.solutions,
            "Counting estimate"
        );
        Ok(CountReport {
            precision,
            estimate,
            rounded: estimate.rounded(),
            result,
        })
    }

    /// Run Grover search with `iterations` iterations and verify the most frequent outcome.
    pub fn search(
        &self,
        formula: &Formula,
        num_vars: u32,
        iterations: usize,
    ) -> Result<SearchReport> {
        self.progress
            .set_message(format!("Searching ({iterations} iterations)..."));

        let circuit = compile_search(formula, num_vars, iterations)
            .context("Failed to build search circuit")?;
        let layout = RegisterLayout::search(num_vars, formula.num_clauses() as u32);
        debug!(
            qubits = circuit.num_qubits(),
            ops = circuit.num_ops(),
            "Compiled search circuit"
        );

        let result = self
            .backend
            .simulate(&circuit, 0, &layout.inputs(), self.config.search.shots)
            .context("Search run failed")?;
        let candidate = result
            .counts
            .most_frequent()
            .map(|(bits, _)| bits.to_string())
            .context("Search run returned no shots")?;
        let assignment = decode_assignment(&candidate)?;
        let satisfied = formula.is_satisfied_by(&assignment);

        info!(iterations, %candidate, satisfied, "Search candidate");
        Ok(SearchReport {
            iterations,
            candidate,
            assignment,
            satisfied,
            result,
        })
    }

    /// Count, pad until at least one iteration is warranted, then search.
    ///
    /// Padding variables are appended to `cnf`, so its variable map and
    /// formula describe the problem that was finally searched.
    pub fn solve(&self, cnf: &mut ParsedCnf) -> Result<SolveOutcome> {
        let precision = self.config.counting.precision;
        let mut padding = 0;

        let mut report = self.count(&cnf.formula, cnf.num_vars(), precision)?;
        if report.rounded == 0 {
            return Ok(SolveOutcome::NoSolutionsExpected {
                estimate: report.estimate,
                padding,
            });
        }

        let mut r = optimal_iterations(cnf.num_vars(), report.rounded);
        while r < 1.0 {
            if padding >= self.config.solve.max_padding {
                bail!(
                    "Optimal iteration count {r:.3} is still below 1 after {padding} \
                     padding variables (solve.max_padding)"
                );
            }
            let index = cnf.pad();
            padding += 1;
            debug!(index, r, "Added padding variable");

            report = self.count(&cnf.formula, cnf.num_vars(), precision)?;
            if report.rounded == 0 {
                return Ok(SolveOutcome::NoSolutionsExpected {
                    estimate: report.estimate,
                    padding,
                });
            }
            r = optimal_iterations(cnf.num_vars(), report.rounded);
        }

        let first = r.trunc() as usize;
        let mut attempts = Vec::new();
        let fallbacks = self.config.solve.fallback_iterations.iter().copied();
        for iterations in std::iter::once(first).chain(fallbacks) {
            attempts.push(iterations);
            let search = self.search(&cnf.formula, cnf.num_vars(), iterations)?;
            if search.satisfied {
                return Ok(SolveOutcome::Solved {
                    estimate: report.estimate,
                    padding,
                    search,
                    attempts,
                });
            }
            warn!(
                iterations,
                candidate = %search.candidate,
                "Candidate does not satisfy the formula"
            );
        }

        Ok(SolveOutcome::Unverified {
            estimate: report.estimate,
            padding,
            attempts,
        })
    }
}
