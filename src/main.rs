//! Binary entry point for the duplicate-content scanner CLI.
//!
//! The binary is kept minimal; all business logic lives in the library
//! (`lib.rs`), which keeps the pipeline testable without spawning
//! subprocesses.

use std::process;

use clap::Parser;

use dupdigest::cli::CliArgs;
use dupdigest::run;

/// Funnels every fatal-error message through one code path, so "Stderr:
/// ... error messages" in the external contract is backed by a single
/// call site rather than scattered `eprintln!`s.
fn log_fatal(message: &str) {
    eprintln!("dupdigest: {message}");
}

fn main() {
    let args = CliArgs::parse();

    if let Err(err) = run(&args) {
        log_fatal(&err.to_string());
        process::exit(1);
    }
}
