//! The `rpms` command

use std::path::Path;

use dnf_bazel::{Manifest, RPM_KIND};

use super::output::{Output, finish};
use crate::error::{CliError, Result};

/// Synchronize the manifest's packages into `rpm` rules of a WORKSPACE file
pub fn run_rpms(workspace: &Path, manifest: &Path, dry_run: bool, diff: bool) -> Result<()> {
    let manifest_data = Manifest::load(manifest)?;
    if manifest_data.packages.is_empty() {
        return Err(CliError::user(format!(
            "Manifest {} lists no packages",
            manifest.display()
        )));
    }

    let mut doc = dnf_bazel::load_workspace(workspace)?;
    let report = dnf_bazel::add_rpms(&mut doc, &manifest_data.packages);

    finish(
        &doc,
        workspace,
        Output::from_flags(dry_run, diff),
        report,
        RPM_KIND,
    )
}
