//! qsat Command-Line Interface
//!
//! Reads a CNF formula, estimates its number of solutions with quantum
//! counting and finds a satisfying assignment with Grover search, running
//! every circuit on the local statevector simulator.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod controller;

use commands::common::InputFormat;
use commands::inspect::CircuitKind;
use commands::{count, inspect, search, solve, version};
use config::Config;

/// qsat - Grover search and quantum counting for CNF formulas
#[derive(Parser)]
#[command(name = "qsat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (YAML)
    #[arg(short, long, global = true, env = "QSAT_CONFIG")]
    config: Option<String>,

    /// Seed for shot sampling
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Input format (detected from extension or content if omitted)
    #[arg(short, long, global = true, value_enum)]
    format: Option<InputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the number of satisfying assignments
    Count {
        /// Input file (CSV or DIMACS)
        input: String,

        /// Number of counting qubits
        #[arg(short, long)]
        precision: Option<u32>,

        /// Shots for the counting run
        #[arg(short, long)]
        shots: Option<u32>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run Grover search with a fixed number of iterations
    Search {
        /// Input file (CSV or DIMACS)
        input: String,

        /// Number of Grover iterations
        #[arg(short, long)]
        iterations: usize,

        /// Shots for the search run
        #[arg(short, long)]
        shots: Option<u32>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count, then search with the estimated optimal iteration count
    Solve {
        /// Input file (CSV or DIMACS)
        input: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show register layout and gate statistics of a compiled circuit
    Inspect {
        /// Input file (CSV or DIMACS)
        input: String,

        /// Circuit to build
        #[arg(long, value_enum, default_value = "search")]
        circuit: CircuitKind,

        /// Grover iterations for the search circuit
        #[arg(short, long, default_value = "1")]
        iterations: usize,

        /// Counting qubits for the counting circuit
        #[arg(short, long)]
        precision: Option<u32>,

        /// Write the circuit as JSON to this file
        #[arg(long)]
        emit_json: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = Config::load(cli.config.as_deref());

    // Setup logging
    let level = match cli.verbose {
        0 => loaded
            .as_ref()
            .map_or("warn", |config| config.logging.level.as_str()),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Execute command
    let result = loaded.map_err(anyhow::Error::from).and_then(|mut config| {
        if let Some(seed) = cli.seed {
            config.simulator.seed = Some(seed);
        }
        run(cli.command, cli.format, &mut config)
    });

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(command: Commands, format: Option<InputFormat>, config: &mut Config) -> anyhow::Result<()> {
    match command {
        Commands::Count {
            input,
            precision,
            shots,
            json,
        } => {
            if let Some(shots) = shots {
                config.counting.shots = shots;
            }
            count::execute(&input, format, precision, json, config)
        }

        Commands::Search {
            input,
            iterations,
            shots,
            json,
        } => {
            if let Some(shots) = shots {
                config.search.shots = shots;
            }
            search::execute(&input, format, iterations, json, config)
        }

        Commands::Solve { input, json } => solve::execute(&input, format, json, config),

        Commands::Inspect {
            input,
            circuit,
            iterations,
            precision,
            emit_json,
        } => inspect::execute(
            &input,
            format,
            circuit,
            iterations,
            precision,
            emit_json.as_deref(),
            config,
        ),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_solve() {
        let cli = Cli::try_parse_from(["qsat", "solve", "f.csv", "--json", "--seed", "3"]).unwrap();
        assert_eq!(cli.seed, Some(3));
        assert!(matches!(cli.command, Commands::Solve { json: true, .. }));
    }

    #[test]
    fn test_parse_search_requires_iterations() {
        assert!(Cli::try_parse_from(["qsat", "search", "f.csv"]).is_err());
        let cli = Cli::try_parse_from(["qsat", "search", "f.cnf", "-i", "4"]).unwrap();
        assert!(matches!(cli.command, Commands::Search { iterations: 4, .. }));
    }

    #[test]
    fn test_parse_format_and_verbosity() {
        let cli =
            Cli::try_parse_from(["qsat", "-vv", "count", "f.txt", "--format", "dimacs"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, Some(InputFormat::Dimacs));
    }

    #[test]
    fn test_parse_inspect_defaults() {
        let cli = Cli::try_parse_from(["qsat", "inspect", "f.csv"]).unwrap();
        match cli.command {
            Commands::Inspect {
                circuit,
                iterations,
                precision,
                emit_json,
                ..
            } => {
                assert_eq!(circuit, CircuitKind::Search);
                assert_eq!(iterations, 1);
                assert_eq!(precision, None);
                assert_eq!(emit_json, None);
            }
            _ => panic!("expected inspect"),
        }
    }
}
