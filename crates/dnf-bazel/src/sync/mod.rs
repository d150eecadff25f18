//! Synchronization of rules with package descriptors
//!
//! Both synchronizers follow the same pattern: take every rule of their
//! kind out of the document, upsert the desired rules by name, then append
//! the whole set back in ascending name order. Rules that no descriptor
//! mentions are kept.

mod rpm_syncer;
mod tree_syncer;

pub use rpm_syncer::add_rpms;
pub use tree_syncer::add_tree;

use dnf_build::{Document, Rule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts from one synchronization call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Rules that did not exist before the call
    pub created: usize,
    /// Existing rules that were rewritten
    pub updated: usize,
    /// Rules of the kind in the document afterwards
    pub total: usize,
}

/// Remove every rule of `kind` and key it by name. A later rule with a
/// duplicate name replaces the earlier one.
fn take_rules(doc: &mut Document, kind: &str) -> BTreeMap<String, Rule> {
    doc.del_rules(kind, None)
        .into_iter()
        .map(|rule| (rule.name().unwrap_or_default().to_string(), rule))
        .collect()
}

/// Append rules in ascending name order
fn reinsert(doc: &mut Document, rules: BTreeMap<String, Rule>) {
    for rule in rules.into_values() {
        doc.insert_at_end(rule);
    }
}
