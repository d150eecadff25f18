//! The `rpmtree` command

use std::path::Path;

use dnf_bazel::{Manifest, RPMTREE_KIND};

use super::output::{Output, finish};
use crate::error::{CliError, Result};

/// Synchronize the manifest's packages into the `rpmtree` rule `name`.
///
/// Files given on the command line replace the manifest's `files`.
pub fn run_rpmtree(
    buildfile: &Path,
    name: &str,
    manifest: &Path,
    files: &[String],
    dry_run: bool,
    diff: bool,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CliError::user("rpmtree name must not be empty"));
    }

    let manifest_data = Manifest::load(manifest)?;
    let files = if files.is_empty() {
        manifest_data.files.as_slice()
    } else {
        files
    };

    let mut doc = dnf_bazel::load_build(buildfile)?;
    let report = dnf_bazel::add_tree(name, &mut doc, &manifest_data.packages, files);

    finish(
        &doc,
        buildfile,
        Output::from_flags(dry_run, diff),
        report,
        RPMTREE_KIND,
    )
}
