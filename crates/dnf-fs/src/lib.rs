//! Filesystem helpers for bazeldnf
//!
//! Reads build files, writes them back atomically, and loads package
//! manifests in any of the supported configuration formats.

pub mod config;
pub mod error;
pub mod io;

pub use config::ConfigStore;
pub use error::{Error, Result};
