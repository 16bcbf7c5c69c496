//! CLI argument parsing for mutexfile.
//!
//! The binary takes no arguments of its own; clap supplies `--help` and
//! `--version` and rejects anything else.

use clap::Parser;

/// Append two lock-guarded batches of lines to test.txt.
#[derive(Parser, Debug)]
#[command(name = "mutexfile")]
#[command(author, version, long_about = None)]
pub struct Cli {}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
