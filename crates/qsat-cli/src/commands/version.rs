//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Grover search and quantum counting for CNF formulas",
        style("qsat").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qsat-ir           Circuit intermediate representation");
    println!("  qsat-core         Oracle, diffuser, Grover, QFT and counting");
    println!("  qsat-parse        CSV and DIMACS readers");
    println!("  qsat-hal          Backend abstraction");
    println!("  qsat-adapter-sim  Statevector simulator");
    println!("  qsat-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
