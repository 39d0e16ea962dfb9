//! # Stencil CLI
//!
//! This is the binary entry point for the `stencil` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and output styling.
//! - Executing the appropriate command and reporting errors.
//!
//! The scaffolding logic lives in the `stencil` library crate; the binary is
//! a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
