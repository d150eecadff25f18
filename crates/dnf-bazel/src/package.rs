//! Package descriptors
//!
//! A descriptor names one fetchable rpm: where it lives on the mirrors and
//! what it must hash to. Descriptors are inputs only; synchronization
//! never changes them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Epoch, version and release of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epoch: Option<u32>,
    pub version: String,
    pub release: String,
}

impl Version {
    pub fn new(version: impl Into<String>, release: impl Into<String>) -> Self {
        Self {
            epoch: None,
            version: version.into(),
            release: release.into(),
        }
    }

    pub fn with_epoch(mut self, epoch: u32) -> Self {
        self.epoch = Some(epoch);
        self
    }
}

impl fmt::Display for Version {
    /// `[epoch:]version-release`; a zero epoch is left out
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(epoch) = self.epoch.filter(|e| *e != 0) {
            write!(f, "{epoch}:")?;
        }
        write!(f, "{}-{}", self.version, self.release)
    }
}

/// A package to fetch with an `rpm` rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    /// sha256 of the rpm as hex text
    pub checksum: String,
    /// Location of the rpm relative to a mirror base
    pub href: String,
    #[serde(default)]
    pub mirrors: Vec<String>,
}

impl Package {
    pub fn new(
        name: impl Into<String>,
        checksum: impl Into<String>,
        href: impl Into<String>,
        mirrors: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: None,
            arch: None,
            checksum: checksum.into(),
            href: href.into(),
            mirrors,
        }
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = Some(arch.into());
        self
    }

    /// The rule name this package is stored under,
    /// `name[-[epoch:]version-release][.arch]`
    pub fn identity(&self) -> String {
        self.to_string()
    }

    /// Download URLs, one per mirror in mirror order
    pub fn urls(&self) -> Vec<String> {
        self.mirrors
            .iter()
            .map(|mirror| url_join(mirror, &self.href))
            .collect()
    }

    /// Label an `rpmtree` uses for the package. Only the name goes into
    /// it; version and arch are ignored.
    pub fn reference(&self) -> String {
        format!("@{}//rpm", self.name)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(version) = &self.version {
            write!(f, "-{version}")?;
        }
        if let Some(arch) = &self.arch {
            write!(f, ".{arch}")?;
        }
        Ok(())
    }
}

/// Join a mirror base and an href with exactly one slash between them
pub fn url_join(mirror: &str, href: &str) -> String {
    let base = mirror.trim_end_matches('/');
    let href = href.trim_start_matches('/');
    if base.is_empty() {
        return href.to_string();
    }
    if href.is_empty() {
        return base.to_string();
    }
    format!("{base}/{href}")
}
