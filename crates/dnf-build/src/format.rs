//! Canonical printer
//!
//! Output is a pure function of the syntax tree, which makes formatting
//! idempotent: printing a reparsed file yields the same text.

use crate::syntax::{Arg, CallExpr, DictExpr, Expr, ListExpr, Rule, Stmt};

const INDENT: &str = "    ";

/// Render statements as canonical text
pub(crate) fn format_stmts(stmts: &[Stmt]) -> String {
    let mut printer = Printer::default();
    for (i, stmt) in stmts.iter().enumerate() {
        if i > 0 {
            printer.out.push('\n');
        }
        printer.stmt(stmt);
    }
    printer.out
}

/// Quote a string value with double quotes
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 || c == '\x7f' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[derive(Default)]
struct Printer {
    out: String,
}

impl Printer {
    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Comment(block) => self.comment_lines(&block.lines, 0),
            Stmt::Raw(raw) => {
                self.comment_lines(&raw.comments, 0);
                self.out.push_str(&raw.text);
                self.out.push('\n');
            }
            Stmt::Rule(rule) => self.rule(rule),
        }
    }

    fn rule(&mut self, rule: &Rule) {
        self.comment_lines(&rule.comments, 0);
        let expand = rule_is_multiline(rule);
        self.call(&rule.call, 0, expand, true);
        self.suffix(rule.suffix.as_deref());
        self.out.push('\n');
    }

    fn indent(&mut self, level: usize) {
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
    }

    fn comment_lines(&mut self, lines: &[String], level: usize) {
        for line in lines {
            self.indent(level);
            self.out.push_str(line);
            self.out.push('\n');
        }
    }

    fn suffix(&mut self, suffix: Option<&str>) {
        if let Some(comment) = suffix {
            self.out.push_str("  ");
            self.out.push_str(comment);
        }
    }

    /// Print `items` between `open` and `close`, one per line
    fn block<T>(
        &mut self,
        open: &str,
        close: &str,
        items: &[T],
        trailing: &[String],
        level: usize,
        mut item: impl FnMut(&mut Self, &T, usize) -> (Vec<String>, Option<String>),
    ) {
        self.out.push_str(open);
        self.out.push('\n');
        for value in items {
            // The closure prints the item and hands back its comments; the
            // leading comments have to go first, so print into a scratch buffer.
            let saved = std::mem::take(&mut self.out);
            let (comments, suffix) = item(self, value, level + 1);
            let printed = std::mem::replace(&mut self.out, saved);

            self.comment_lines(&comments, level + 1);
            self.indent(level + 1);
            self.out.push_str(&printed);
            self.out.push(',');
            self.suffix(suffix.as_deref());
            self.out.push('\n');
        }
        self.comment_lines(trailing, level + 1);
        self.indent(level);
        self.out.push_str(close);
    }

    fn call(&mut self, call: &CallExpr, level: usize, multiline: bool, top_level: bool) {
        self.expr(&call.func, level, false);
        if multiline || call_has_comments(call) {
            self.block("(", ")", &call.args, &call.trailing, level, |p, arg, level| {
                p.arg(arg, level, top_level);
                (arg.comments.clone(), arg.suffix.clone())
            });
        } else {
            self.out.push('(');
            for (i, arg) in call.args.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(", ");
                }
                self.arg(arg, level, false);
            }
            self.out.push(')');
        }
    }

    fn arg(&mut self, arg: &Arg, level: usize, expand: bool) {
        if let Some(name) = &arg.name {
            self.out.push_str(name);
            self.out.push_str(" = ");
        }
        self.expr(&arg.value, level, expand);
    }

    fn list(&mut self, list: &ListExpr, level: usize, expand: bool) {
        let multiline = list_has_comments(list) || (expand && list.items.len() > 1);
        if multiline {
            self.block("[", "]", &list.items, &list.trailing, level, |p, item, level| {
                p.expr(&item.value, level, expand);
                (item.comments.clone(), item.suffix.clone())
            });
        } else {
            self.out.push('[');
            for (i, item) in list.items.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(", ");
                }
                self.expr(&item.value, level, false);
            }
            self.out.push(']');
        }
    }

    fn dict(&mut self, dict: &DictExpr, level: usize, expand: bool) {
        let multiline = dict_has_comments(dict) || (expand && !dict.entries.is_empty());
        if multiline {
            self.block("{", "}", &dict.entries, &dict.trailing, level, |p, entry, level| {
                p.expr(&entry.key, level, false);
                p.out.push_str(": ");
                p.expr(&entry.value, level, expand);
                (entry.comments.clone(), entry.suffix.clone())
            });
        } else {
            self.out.push('{');
            for (i, entry) in dict.entries.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(", ");
                }
                self.expr(&entry.key, level, false);
                self.out.push_str(": ");
                self.expr(&entry.value, level, false);
            }
            self.out.push('}');
        }
    }

    fn expr(&mut self, expr: &Expr, level: usize, expand: bool) {
        match expr {
            Expr::Ident(name) | Expr::Number(name) => self.out.push_str(name),
            Expr::String(s) => match s.raw() {
                Some(raw) => self.out.push_str(raw),
                None => self.out.push_str(&quote(&s.value)),
            },
            Expr::List(list) => self.list(list, level, expand),
            Expr::Dict(dict) => self.dict(dict, level, expand),
            Expr::Tuple(items) => {
                self.out.push('(');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.expr(item, level, false);
                }
                if items.len() == 1 {
                    self.out.push(',');
                }
                self.out.push(')');
            }
            Expr::Paren(x) => {
                self.out.push('(');
                self.expr(x, level, false);
                self.out.push(')');
            }
            Expr::Call(call) => self.call(call, level, false, false),
            Expr::Dot { x, name } => {
                self.expr(x, level, false);
                self.out.push('.');
                self.out.push_str(name);
            }
            Expr::Index { x, index } => {
                self.expr(x, level, false);
                self.out.push('[');
                self.expr(index, level, false);
                self.out.push(']');
            }
            Expr::Unary { op, x } => {
                self.out.push_str(op);
                if op == "not" {
                    self.out.push(' ');
                }
                self.expr(x, level, false);
            }
            Expr::Binary { op, lhs, rhs } => {
                self.expr(lhs, level, expand);
                self.out.push(' ');
                self.out.push_str(op);
                self.out.push(' ');
                self.expr(rhs, level, expand);
            }
        }
    }
}

/// Whether a top-level call prints one argument per line
fn rule_is_multiline(rule: &Rule) -> bool {
    if call_has_comments(&rule.call) {
        return true;
    }
    if rule.kind() == "load" {
        return false;
    }
    rule.call.args.len() > 1 || rule.call.args.iter().any(|arg| expands(&arg.value))
}

/// Whether a rule attribute value spreads over several lines
fn expands(expr: &Expr) -> bool {
    match expr {
        Expr::List(list) => list.items.len() > 1 || list_has_comments(list),
        Expr::Dict(dict) => !dict.entries.is_empty(),
        Expr::Binary { lhs, rhs, .. } => expands(lhs) || expands(rhs),
        _ => false,
    }
}

fn call_has_comments(call: &CallExpr) -> bool {
    !call.trailing.is_empty()
        || call
            .args
            .iter()
            .any(|arg| !arg.comments.is_empty() || arg.suffix.is_some())
}

fn list_has_comments(list: &ListExpr) -> bool {
    !list.trailing.is_empty()
        || list
            .items
            .iter()
            .any(|item| !item.comments.is_empty() || item.suffix.is_some())
}

fn dict_has_comments(dict: &DictExpr) -> bool {
    !dict.trailing.is_empty()
        || dict
            .entries
            .iter()
            .any(|entry| !entry.comments.is_empty() || entry.suffix.is_some())
}
