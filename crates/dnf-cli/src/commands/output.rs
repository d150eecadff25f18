//! Finishing a command: write, print, or diff the updated file

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use dnf_bazel::SyncReport;
use dnf_build::{Document, Flavor};

use crate::error::Result;

/// How the updated document leaves the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Write,
    DryRun,
    Diff,
}

impl Output {
    pub fn from_flags(dry_run: bool, diff: bool) -> Self {
        match (dry_run, diff) {
            (_, true) => Self::Diff,
            (true, false) => Self::DryRun,
            (false, false) => Self::Write,
        }
    }
}

pub fn finish(
    doc: &Document,
    path: &Path,
    output: Output,
    report: SyncReport,
    kind: &str,
) -> Result<()> {
    let write = match doc.flavor() {
        Flavor::Workspace => dnf_bazel::write_workspace,
        Flavor::Build => dnf_bazel::write_build,
    };

    match output {
        Output::Write => {
            write(false, doc, path)?;
            println!(
                "{} {} {} rules in {} ({} new, {} updated)",
                "OK".green().bold(),
                report.total,
                kind,
                path.display().to_string().cyan(),
                report.created,
                report.updated
            );
        }
        Output::DryRun => write(true, doc, path)?,
        Output::Diff => {
            let diff = dnf_bazel::preview_diff(doc, path)?;
            if diff.is_empty() {
                println!("{} {} is up to date", "OK".green().bold(), path.display());
            } else {
                let mut stdout = std::io::stdout().lock();
                for line in diff.lines() {
                    writeln!(stdout, "{}", colorize(line))?;
                }
            }
        }
    }
    Ok(())
}

fn colorize(line: &str) -> String {
    if line.starts_with("+++") || line.starts_with("---") {
        line.bold().to_string()
    } else if line.starts_with('+') {
        line.green().to_string()
    } else if line.starts_with('-') {
        line.red().to_string()
    } else if line.starts_with("@@") {
        line.cyan().to_string()
    } else {
        line.to_string()
    }
}
