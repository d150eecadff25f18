//! bazeldnf CLI
//!
//! Writes `rpm` rules into WORKSPACE files and `rpmtree` bundles into BUILD
//! files from a package manifest.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    execute_command(cli.command)
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Rpms {
            workspace,
            manifest,
            dry_run,
            diff,
        } => commands::run_rpms(&workspace, &manifest, dry_run, diff),
        Commands::Rpmtree {
            buildfile,
            name,
            manifest,
            files,
            dry_run,
            diff,
        } => commands::run_rpmtree(&buildfile, &name, &manifest, &files, dry_run, diff),
    }
}
