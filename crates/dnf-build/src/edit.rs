//! Statement list editing

use crate::document::Document;
use crate::syntax::{Rule, Stmt};

/// Insert `stmt` after the last statement that is not a comment block, so
/// that a trailing comment block stays at the end of the file.
pub fn insert_at_end(mut stmts: Vec<Stmt>, stmt: Stmt) -> Vec<Stmt> {
    let index = stmts
        .iter()
        .rposition(|s| !s.is_comment())
        .map_or(0, |i| i + 1);
    stmts.insert(index, stmt);
    stmts
}

impl Document {
    /// Append a rule after the last non-comment statement
    pub fn insert_at_end(&mut self, rule: Rule) {
        let stmts = std::mem::take(&mut self.stmts);
        self.stmts = insert_at_end(stmts, Stmt::Rule(rule));
    }

    /// Remove every rule of `kind`, or only those named `name` when a name
    /// is given. Returns the removed rules in document order.
    pub fn del_rules(&mut self, kind: &str, name: Option<&str>) -> Vec<Rule> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.stmts.len());

        for stmt in std::mem::take(&mut self.stmts) {
            match stmt {
                Stmt::Rule(rule)
                    if rule.kind() == kind && name.is_none_or(|n| rule.name() == Some(n)) =>
                {
                    removed.push(rule);
                }
                other => kept.push(other),
            }
        }

        self.stmts = kept;
        if !removed.is_empty() {
            tracing::debug!(kind, count = removed.len(), "removed rules");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::Flavor;
    use crate::syntax::{CommentBlock, Expr, RawStmt};
    use pretty_assertions::assert_eq;

    fn named(kind: &str, name: &str) -> Rule {
        let mut rule = Rule::new(kind);
        rule.set_attr("name", Expr::string(name));
        rule
    }

    fn comment(text: &str) -> Stmt {
        Stmt::Comment(CommentBlock {
            lines: vec![text.to_string()],
        })
    }

    #[test]
    fn insert_into_empty_list() {
        let stmts = insert_at_end(Vec::new(), Stmt::Rule(named("rpm", "a")));
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn insert_keeps_trailing_comments_last() {
        let stmts = vec![
            comment("# head"),
            Stmt::Raw(RawStmt {
                comments: Vec::new(),
                text: "x = 1".into(),
            }),
            comment("# tail"),
        ];
        let stmts = insert_at_end(stmts, Stmt::Rule(named("rpm", "a")));
        assert!(matches!(&stmts[2], Stmt::Rule(rule) if rule.name() == Some("a")));
        assert!(stmts[3].is_comment());
    }

    #[test]
    fn insert_after_leading_comments_only() {
        let stmts = insert_at_end(vec![comment("# only")], Stmt::Rule(named("rpm", "a")));
        assert!(stmts[0].as_rule().is_some());
        assert!(stmts[1].is_comment());
    }

    #[test]
    fn del_rules_by_kind_and_name() {
        let mut doc = Document::new("WORKSPACE", Flavor::Workspace);
        doc.insert_at_end(named("rpm", "a"));
        doc.insert_at_end(named("http_archive", "a"));
        doc.insert_at_end(named("rpm", "b"));
        doc.insert_at_end(named("rpm", "a"));

        let removed = doc.del_rules("rpm", Some("a"));
        assert_eq!(removed.len(), 2);
        assert_eq!(doc.rules("").count(), 2);

        let removed = doc.del_rules("rpm", None);
        assert_eq!(removed.iter().filter_map(Rule::name).collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(doc.rules("").count(), 1);
    }
}
