//! Package manifests
//!
//! A manifest lists the packages to synchronize and, optionally, the files
//! an `rpmtree` should expose. It can be written as TOML, JSON or YAML.

use crate::Result;
use crate::package::Package;
use dnf_fs::ConfigStore;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub packages: Vec<Package>,

    /// Default file list for `rpmtree` rules
    #[serde(default)]
    pub files: Vec<String>,
}

impl Manifest {
    /// Load a manifest, picking the format from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let manifest: Self = ConfigStore::new().load(path)?;
        tracing::debug!(
            path = %path.display(),
            packages = manifest.packages.len(),
            files = manifest.files.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::Version;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_toml_manifest() {
        let manifest: Manifest = toml::from_str(
            r#"
files = ["/usr/bin/bash"]

[[packages]]
name = "bash"
version = { version = "5.1.8", release = "2.fc35" }
arch = "x86_64"
checksum = "deadbeef"
href = "Packages/b/bash-5.1.8-2.fc35.x86_64.rpm"
mirrors = ["https://mirror.example/fedora/"]
"#,
        )
        .unwrap();

        assert_eq!(
            manifest,
            Manifest {
                packages: vec![
                    Package::new(
                        "bash",
                        "deadbeef",
                        "Packages/b/bash-5.1.8-2.fc35.x86_64.rpm",
                        vec!["https://mirror.example/fedora/".into()],
                    )
                    .with_version(Version::new("5.1.8", "2.fc35"))
                    .with_arch("x86_64")
                ],
                files: vec!["/usr/bin/bash".into()],
            }
        );
    }

    #[test]
    fn empty_manifest_is_valid() {
        let manifest: Manifest = toml::from_str("").unwrap();
        assert_eq!(manifest, Manifest::default());
    }
}
