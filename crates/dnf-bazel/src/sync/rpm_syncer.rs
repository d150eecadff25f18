//! Upserts one `rpm` rule per package

use super::{SyncReport, reinsert, take_rules};
use crate::package::Package;
use crate::rules::{RPM_KIND, RpmRule};
use dnf_build::{Document, Rule};
use std::collections::BTreeSet;
use std::collections::btree_map::Entry;

/// Upsert one `rpm` rule per package into a WORKSPACE document.
///
/// Name and sha256 always follow the package. URLs are only written when
/// the rule has none, so hand-edited URLs survive later runs. Afterwards
/// every `rpm` rule sits at the end of the document sorted by name.
pub fn add_rpms(workspace: &mut Document, packages: &[Package]) -> SyncReport {
    let mut rules = take_rules(workspace, RPM_KIND);
    let mut report = SyncReport::default();
    let mut seen = BTreeSet::new();

    for package in packages {
        let identity = package.identity();
        let first_visit = seen.insert(identity.clone());

        let rule = match rules.entry(identity.clone()) {
            Entry::Occupied(entry) => {
                if first_visit {
                    report.updated += 1;
                }
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                report.created += 1;
                entry.insert(Rule::new(RPM_KIND))
            }
        };

        let mut rpm = RpmRule::new(rule);
        rpm.set_name(&identity);
        rpm.set_sha256(&package.checksum);
        if rpm.urls().is_empty() {
            rpm.set_urls(&package.mirrors, &package.href);
        }
        tracing::debug!(rule = %identity, sha256 = %package.checksum, "upserted rpm rule");
    }

    report.total = rules.len();
    reinsert(workspace, rules);

    tracing::info!(
        path = %workspace.path().display(),
        created = report.created,
        updated = report.updated,
        total = report.total,
        "synchronized rpm rules"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnf_build::{Expr, Flavor};
    use pretty_assertions::assert_eq;

    fn package(name: &str, checksum: &str) -> Package {
        Package::new(
            name,
            checksum,
            format!("{name}.rpm"),
            vec!["http://m/".to_string()],
        )
    }

    #[test]
    fn report_counts_created_and_updated() {
        let mut doc = Document::new("WORKSPACE", Flavor::Workspace);
        let report = add_rpms(&mut doc, &[package("a", "1"), package("b", "2")]);
        assert_eq!(
            report,
            SyncReport {
                created: 2,
                updated: 0,
                total: 2
            }
        );

        let report = add_rpms(&mut doc, &[package("b", "3"), package("c", "4"), package("b", "5")]);
        assert_eq!(
            report,
            SyncReport {
                created: 1,
                updated: 1,
                total: 3
            }
        );
    }

    #[test]
    fn duplicate_packages_last_checksum_wins() {
        let mut doc = Document::new("WORKSPACE", Flavor::Workspace);
        add_rpms(&mut doc, &[package("a", "old"), package("a", "new")]);

        let rule = doc.rule(RPM_KIND, "a").unwrap();
        assert_eq!(rule.attr("sha256").and_then(Expr::as_str), Some("new"));
        assert_eq!(doc.rules(RPM_KIND).count(), 1);
    }
}
