//! Parsed BUILD / WORKSPACE file

use crate::error::{Error, Result};
use crate::flavor::Flavor;
use crate::format::format_stmts;
use crate::parser::parse_statements;
use crate::syntax::{Rule, Stmt};
use std::path::{Path, PathBuf};

/// A parsed BUILD or WORKSPACE file.
///
/// Statements are public: callers edit them in place and format the
/// document afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    flavor: Flavor,
    pub stmts: Vec<Stmt>,
}

impl Document {
    /// An empty document
    pub fn new(path: impl Into<PathBuf>, flavor: Flavor) -> Self {
        Self {
            path: path.into(),
            flavor,
            stmts: Vec::new(),
        }
    }

    /// Parse with an explicit flavor
    pub fn parse(path: impl AsRef<Path>, flavor: Flavor, data: &[u8]) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let source = std::str::from_utf8(data).map_err(|e| {
            let line = data[..e.valid_up_to()].iter().filter(|b| **b == b'\n').count() + 1;
            Error::parse(&display, line, 1, format!("invalid UTF-8: {e}"))
        })?;

        let stmts = parse_statements(&display, source)?;
        tracing::debug!(path = %path.display(), flavor = %flavor, statements = stmts.len(), "parsed");

        Ok(Self {
            path: path.to_path_buf(),
            flavor,
            stmts,
        })
    }

    /// Parse a BUILD file
    pub fn parse_build(path: impl AsRef<Path>, data: &[u8]) -> Result<Self> {
        Self::parse(path, Flavor::Build, data)
    }

    /// Parse a WORKSPACE file
    pub fn parse_workspace(path: impl AsRef<Path>, data: &[u8]) -> Result<Self> {
        Self::parse(path, Flavor::Workspace, data)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Canonical text rendering
    pub fn format_string(&self) -> String {
        format_stmts(&self.stmts)
    }

    /// Canonical rendering as bytes, ready to be written out
    pub fn format(&self) -> Vec<u8> {
        self.format_string().into_bytes()
    }

    /// Rules of the given kind in document order. An empty kind matches
    /// every rule.
    pub fn rules<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.stmts
            .iter()
            .filter_map(Stmt::as_rule)
            .filter(move |rule| kind.is_empty() || rule.kind() == kind)
    }

    /// The first rule with the given kind and name
    pub fn rule<'a>(&'a self, kind: &'a str, name: &str) -> Option<&'a Rule> {
        self.rules(kind).find(move |rule| rule.name() == Some(name))
    }

    /// Compare statements, ignoring how strings were spelled and where
    /// the document came from
    pub fn semantic_eq(&self, other: &Document) -> bool {
        self.stmts == other.stmts
    }
}
