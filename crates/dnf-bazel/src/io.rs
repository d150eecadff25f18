//! Loading and writing WORKSPACE and BUILD files
//!
//! Writes either replace the file atomically or, in dry-run mode, print the
//! formatted document to a preview writer instead.

use crate::Result;
use dnf_build::{Document, Flavor, diff};
use std::io::{ErrorKind, Write};
use std::path::Path;

pub fn load_workspace(path: &Path) -> Result<Document> {
    load(path, Flavor::Workspace)
}

pub fn load_build(path: &Path) -> Result<Document> {
    load(path, Flavor::Build)
}

fn load(path: &Path, flavor: Flavor) -> Result<Document> {
    let data = dnf_fs::io::read_bytes(path)?;
    Ok(Document::parse(path, flavor, &data)?)
}

/// Write a WORKSPACE document to `path`, or to stdout when `dry_run` is set
pub fn write_workspace(dry_run: bool, workspace: &Document, path: &Path) -> Result<()> {
    write_to(dry_run, workspace, path, &mut std::io::stdout().lock())
}

/// Write a BUILD document to `path`, or to stdout when `dry_run` is set
pub fn write_build(dry_run: bool, buildfile: &Document, path: &Path) -> Result<()> {
    write_to(dry_run, buildfile, path, &mut std::io::stdout().lock())
}

/// Write a document to `path`, or to `preview` when `dry_run` is set
pub fn write_to<W: Write>(
    dry_run: bool,
    doc: &Document,
    path: &Path,
    preview: &mut W,
) -> Result<()> {
    let content = doc.format();
    if dry_run {
        preview.write_all(&content)?;
        preview.flush()?;
        tracing::debug!(path = %path.display(), "[dry-run] printed instead of writing");
        return Ok(());
    }

    dnf_fs::io::write_atomic(path, &content)?;
    tracing::info!(path = %path.display(), bytes = content.len(), "wrote {}", doc.flavor());
    Ok(())
}

/// Unified diff between the file at `path` and the formatted document. A
/// missing file diffs as empty; an empty result means writing would not
/// change anything.
pub fn preview_diff(doc: &Document, path: &Path) -> Result<String> {
    let current = match dnf_fs::io::read_text(path) {
        Ok(text) => text,
        Err(dnf_fs::Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            String::new()
        }
        Err(e) => return Err(e.into()),
    };

    let label = path.display().to_string();
    Ok(diff::unified(
        &current,
        &doc.format_string(),
        &format!("a/{label}"),
        &format!("b/{label}"),
    ))
}
