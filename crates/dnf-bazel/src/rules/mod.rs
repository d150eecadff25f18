//! Typed views over `rpm` and `rpmtree` rules
//!
//! A view borrows one rule from a document and reads or writes its
//! attributes with the shapes the rule kind expects.

mod rpm;
mod tree;
mod view;

pub use rpm::{RPM_KIND, RpmRule};
pub use tree::{RPMTREE_KIND, RpmTree};
pub use view::{AttrValue, RuleView};
