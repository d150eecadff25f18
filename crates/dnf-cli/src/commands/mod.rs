//! Command implementations

mod output;
pub mod rpms;
pub mod rpmtree;

pub use rpms::run_rpms;
pub use rpmtree::run_rpmtree;
