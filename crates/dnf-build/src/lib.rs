//! Parsing, editing, formatting and diffing of Bazel BUILD and WORKSPACE files
//!
//! Top-level calls are parsed into [`Rule`]s that can be looked up by
//! kind and name, edited attribute by attribute, removed, and appended.
//! Everything else in a file is carried through verbatim. Formatting is
//! canonical and idempotent, so repeated rewrites converge.

pub mod diff;
pub mod document;
pub mod edit;
pub mod error;
pub mod flavor;
pub mod format;
mod lexer;
mod parser;
pub mod syntax;

pub use document::Document;
pub use edit::insert_at_end;
pub use error::{Error, Result};
pub use flavor::Flavor;
pub use syntax::{
    Arg, CallExpr, CommentBlock, DictEntry, DictExpr, Element, Expr, ListExpr, RawStmt, Rule,
    Stmt, StringExpr,
};
