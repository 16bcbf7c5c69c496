//! mutexfile: two worker threads sharing an append-only file through one lock.
//!
//! This is the main entry point. It parses arguments, runs both workers
//! against the fixed target file, and maps coordinator errors to exit codes.
//! Write failures inside a worker are reported by that worker and do not
//! change the exit code.

mod cli;
pub mod coordinator;
pub mod diagnostics;
pub mod error;
pub mod exit_codes;
pub mod locks;
pub mod resource;
pub mod worker;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // No options of its own; this only handles --help and --version.
    Cli::parse_args();

    match coordinator::run_default() {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
