//! Upserts a named `rpmtree` rule from packages and files

use super::{SyncReport, reinsert, take_rules};
use crate::package::Package;
use crate::rules::{RPMTREE_KIND, RpmTree};
use dnf_build::{Document, Rule};
use std::collections::btree_map::Entry;

/// Create or overwrite the `rpmtree` rule called `name` in a BUILD document.
///
/// `rpms` lists each package's repository label in package order; `files`
/// is stored sorted. Other `rpmtree` rules are kept, and all of them end up
/// at the end of the document sorted by name.
pub fn add_tree(
    name: &str,
    buildfile: &mut Document,
    packages: &[Package],
    files: &[String],
) -> SyncReport {
    let mut rules = take_rules(buildfile, RPMTREE_KIND);
    let mut report = SyncReport::default();

    let rpms: Vec<String> = packages.iter().map(Package::reference).collect();
    let mut files = files.to_vec();
    files.sort();

    let rule = match rules.entry(name.to_string()) {
        Entry::Occupied(entry) => {
            report.updated = 1;
            entry.into_mut()
        }
        Entry::Vacant(entry) => {
            report.created = 1;
            entry.insert(Rule::new(RPMTREE_KIND))
        }
    };

    let mut tree = RpmTree::new(rule);
    tree.set_name(name);
    tree.set_rpms(rpms);
    tree.set_files(files);
    tracing::debug!(rule = name, rpms = packages.len(), "upserted rpmtree rule");

    report.total = rules.len();
    reinsert(buildfile, rules);

    tracing::info!(
        path = %buildfile.path().display(),
        created = report.created,
        updated = report.updated,
        total = report.total,
        "synchronized rpmtree rules"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnf_build::Flavor;
    use pretty_assertions::assert_eq;

    #[test]
    fn second_call_updates_in_place() {
        let mut doc = Document::new("BUILD.bazel", Flavor::Build);
        let packages = [Package::new("foo", "", "foo.rpm", vec![])];

        let first = add_tree("sandbox", &mut doc, &packages, &[]);
        let second = add_tree("sandbox", &mut doc, &packages, &[]);

        assert_eq!((first.created, first.updated), (1, 0));
        assert_eq!((second.created, second.updated), (0, 1));
        assert_eq!(doc.rules(RPMTREE_KIND).count(), 1);
    }
}
