//! Keeps Bazel `rpm` and `rpmtree` rules in sync with a list of packages
//!
//! - **Rule views**: typed access to the attributes of `rpm` and `rpmtree` rules
//! - **Package descriptors**: what to fetch, from where, and what it hashes to
//! - **Synchronizers**: [`add_rpms`] upserts one `rpm` rule per package into a
//!   WORKSPACE file, [`add_tree`] builds a named `rpmtree` bundle in a BUILD file
//! - **File handling**: load, write or preview WORKSPACE and BUILD files
//!
//! Synchronization is deterministic: rules end up sorted by name, so running
//! it twice with the same input leaves the file byte-identical.
//!
//! ```text
//!           dnf-cli
//!              |
//!          dnf-bazel
//!              |
//!      +-------+-------+
//!      |               |
//!   dnf-build       dnf-fs
//! ```
//!
//! # Example
//!
//! ```
//! use dnf_bazel::{Package, add_rpms};
//! use dnf_build::{Document, Flavor};
//!
//! let mut workspace = Document::new("WORKSPACE", Flavor::Workspace);
//! let bash = Package::new("bash", "deadbeef", "bash.rpm", vec!["http://m/".into()]);
//! add_rpms(&mut workspace, &[bash]);
//!
//! assert!(workspace.format_string().contains("\"http://m/bash.rpm\""));
//! ```

pub mod error;
pub mod io;
pub mod manifest;
pub mod package;
pub mod rules;
pub mod sync;

pub use error::{Error, Result};
pub use io::{load_build, load_workspace, preview_diff, write_build, write_to, write_workspace};
pub use manifest::Manifest;
pub use package::{Package, Version, url_join};
pub use rules::{AttrValue, RPM_KIND, RPMTREE_KIND, RpmRule, RpmTree, RuleView};
pub use sync::{SyncReport, add_rpms, add_tree};
