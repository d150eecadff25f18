//! File flavors

use std::fmt;

/// The two kinds of Bazel files this crate edits.
///
/// Both share the same syntax; the flavor is carried along so callers
/// can tell a repository definition file from a package BUILD file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    #[default]
    Build,
    Workspace,
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build => f.write_str("BUILD"),
            Self::Workspace => f.write_str("WORKSPACE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_canonical_file_name() {
        assert_eq!(Flavor::Workspace.to_string(), "WORKSPACE");
        assert_eq!(Flavor::default().to_string(), "BUILD");
    }
}
