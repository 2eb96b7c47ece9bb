//! terralabel CLI — batch team-label injection for terragrunt trees.
//!
//! Reads a project → team lookup from a CSV file and inserts a
//! `biso_team` label into the labels block of every matching
//! `terragrunt.hcl` under the given infrastructure root.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
