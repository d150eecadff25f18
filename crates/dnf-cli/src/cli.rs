//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bazeldnf - Keep Bazel rpm rules in sync with a package manifest
#[derive(Parser, Debug)]
#[command(name = "bazeldnf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Write one rpm rule per manifest package into a WORKSPACE file
    ///
    /// Examples:
    ///   bazeldnf rpms --manifest packages.toml
    ///   bazeldnf rpms --workspace WORKSPACE.bazel --manifest packages.json --diff
    Rpms {
        /// WORKSPACE file to update
        #[arg(short, long, default_value = "WORKSPACE")]
        workspace: PathBuf,

        /// Package manifest (.toml, .json, .yaml)
        #[arg(short, long, env = "BAZELDNF_MANIFEST")]
        manifest: PathBuf,

        /// Print the updated file instead of writing it
        #[arg(long)]
        dry_run: bool,

        /// Print a unified diff instead of writing the file
        #[arg(long, conflicts_with = "dry_run")]
        diff: bool,
    },

    /// Write an rpmtree bundle of the manifest packages into a BUILD file
    ///
    /// Examples:
    ///   bazeldnf rpmtree --name sandbox --manifest packages.toml
    ///   bazeldnf rpmtree --name sandbox --manifest packages.toml --file /usr/bin/bash
    Rpmtree {
        /// BUILD file to update
        #[arg(short, long, default_value = "BUILD.bazel")]
        buildfile: PathBuf,

        /// Name of the rpmtree rule
        #[arg(short, long)]
        name: String,

        /// Package manifest (.toml, .json, .yaml)
        #[arg(short, long, env = "BAZELDNF_MANIFEST")]
        manifest: PathBuf,

        /// File to expose from the bundle; repeatable. Defaults to the
        /// manifest's `files`
        #[arg(short, long = "file")]
        files: Vec<String>,

        /// Print the updated file instead of writing it
        #[arg(long)]
        dry_run: bool,

        /// Print a unified diff instead of writing the file
        #[arg(long, conflicts_with = "dry_run")]
        diff: bool,
    },
}
