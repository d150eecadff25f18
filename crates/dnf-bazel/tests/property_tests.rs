//! Property tests for synchronization ordering and idempotence

use dnf_bazel::{Package, RPM_KIND, add_rpms, add_tree};
use dnf_build::{Document, Flavor, Rule};
use proptest::prelude::*;

fn package_strategy() -> impl Strategy<Value = Package> {
    (
        "[a-zA-Z0-9][a-zA-Z0-9._+-]{0,12}",
        "[0-9a-f]{8}",
        "[a-z/]{0,8}[a-z]\\.rpm",
        prop::collection::vec("https?://[a-z]{1,6}/[a-z/]{0,6}", 0..3),
    )
        .prop_map(|(name, checksum, href, mirrors)| Package::new(name, checksum, href, mirrors))
}

proptest! {
    #[test]
    fn rpm_rules_are_sorted(packages in prop::collection::vec(package_strategy(), 0..12)) {
        let mut doc = Document::new("WORKSPACE", Flavor::Workspace);
        add_rpms(&mut doc, &packages);

        let names: Vec<&str> = doc.rules(RPM_KIND).filter_map(Rule::name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(names, sorted);
    }

    #[test]
    fn rpm_sync_is_idempotent(packages in prop::collection::vec(package_strategy(), 0..12)) {
        let mut doc = Document::new("WORKSPACE", Flavor::Workspace);
        add_rpms(&mut doc, &packages);
        let first = doc.format();

        let mut doc = Document::parse_workspace("WORKSPACE", &first).unwrap();
        add_rpms(&mut doc, &packages);
        prop_assert_eq!(doc.format(), first);
    }

    #[test]
    fn rpm_output_ignores_input_order(
        packages in prop::collection::hash_map("[a-z]{1,8}", package_strategy(), 0..10)
            .prop_map(|map| map.into_iter().map(|(name, mut pkg)| { pkg.name = name; pkg }).collect::<Vec<_>>())
            .prop_shuffle()
    ) {
        let mut reversed = packages.clone();
        reversed.reverse();

        let mut a = Document::new("WORKSPACE", Flavor::Workspace);
        add_rpms(&mut a, &packages);
        let mut b = Document::new("WORKSPACE", Flavor::Workspace);
        add_rpms(&mut b, &reversed);

        prop_assert_eq!(a.format_string(), b.format_string());
    }

    #[test]
    fn tree_sync_is_idempotent(
        packages in prop::collection::vec(package_strategy(), 0..6),
        files in prop::collection::vec("/[a-z/]{1,10}", 0..6),
    ) {
        let mut doc = Document::new("BUILD.bazel", Flavor::Build);
        add_tree("sandbox", &mut doc, &packages, &files);
        let first = doc.format();

        let mut doc = Document::parse_build("BUILD.bazel", &first).unwrap();
        add_tree("sandbox", &mut doc, &packages, &files);
        prop_assert_eq!(doc.format(), first);
    }
}
