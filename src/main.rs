//! Fine Ledger CLI
//!
//! Interactive terminal tracker for team disciplinary fines backed by CSV
//! tables.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-dir data
//! cargo run -- --data-dir data --charts-out fines_charts.svg
//! ```
//!
//! The program loads the players, reasons, and fines tables from the data
//! directory, then runs a numbered menu on stdin/stdout: record a fine,
//! mark one paid, double an overdue one, copy the text summary to the
//! clipboard, render the distribution charts, save, or exit.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing or malformed tables, empty reference data, I/O
//!   failure)

use chrono::Local;
use fine_ledger::cli;
use fine_ledger::core::Session;
use fine_ledger::io::RecordStore;
use fine_ledger::ui;
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Load the three tables; an empty players or reasons table is fatal
    // and nothing is ever written after a failed load.
    let store = RecordStore::new(args.data_dir.clone());
    let tables = match store.load() {
        Ok(tables) => tables,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    println!("Information loaded successfully");

    let mut session = Session::new(tables.fines, tables.players, tables.reasons);

    // Run the menu loop on stdin/stdout
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    let today = Local::now().date_naive();
    if let Err(e) = ui::run_session(
        &store,
        &mut session,
        &mut input,
        &mut output,
        &args.charts_out,
        today,
    ) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
