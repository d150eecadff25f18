//! Attribute access shared by the typed rule views

use dnf_build::{Expr, Rule};

/// The shapes a synchronized rule attribute can take
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Scalar(String),
    List(Vec<String>),
}

impl AttrValue {
    /// `None` when the expression is neither a string nor a list of strings
    pub fn from_expr(expr: &Expr) -> Option<Self> {
        match expr.as_str() {
            Some(value) => Some(Self::Scalar(value.to_string())),
            None => expr.as_string_list().map(Self::List),
        }
    }

    pub fn into_expr(self) -> Expr {
        match self {
            Self::Scalar(value) => Expr::string(value),
            Self::List(items) => Expr::string_list(items),
        }
    }
}

/// Mutable accessor for a single rule.
///
/// The view borrows the rule, so writes land directly in the document
/// (or lookup) that owns it. Reading an attribute that exists with the
/// wrong shape panics: synchronized rules only ever hold strings and
/// string lists.
#[derive(Debug)]
pub struct RuleView<'a> {
    rule: &'a mut Rule,
}

impl<'a> RuleView<'a> {
    pub fn new(rule: &'a mut Rule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &Rule {
        &*self.rule
    }

    /// The `name` attribute, empty when unset
    pub fn name(&self) -> &str {
        self.get_scalar("name").unwrap_or_default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.set_scalar("name", name);
    }

    pub fn get(&self, key: &str) -> Option<AttrValue> {
        let expr = self.rule.attr(key)?;
        match AttrValue::from_expr(expr) {
            Some(value) => Some(value),
            None => self.contract_violation(key, "a string or a list of strings"),
        }
    }

    pub fn set(&mut self, key: &str, value: AttrValue) {
        self.rule.set_attr(key, value.into_expr());
    }

    pub fn get_scalar(&self, key: &str) -> Option<&str> {
        let expr = self.rule.attr(key)?;
        match expr.as_str() {
            Some(value) => Some(value),
            None => self.contract_violation(key, "a string"),
        }
    }

    pub fn set_scalar(&mut self, key: &str, value: impl Into<String>) {
        self.set(key, AttrValue::Scalar(value.into()));
    }

    /// Items of a list attribute in order, empty when unset
    pub fn get_list(&self, key: &str) -> Vec<String> {
        match self.rule.attr(key) {
            None => Vec::new(),
            Some(expr) => expr
                .as_string_list()
                .unwrap_or_else(|| self.contract_violation(key, "a list of strings")),
        }
    }

    /// Replace the attribute with a list holding `items` in the given order
    pub fn set_list<I, S>(&mut self, key: &str, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = items.into_iter().map(Into::into).collect();
        self.set(key, AttrValue::List(items));
    }

    fn contract_violation(&self, key: &str, expected: &str) -> ! {
        panic!(
            "{} rule {:?}: attribute `{key}` is not {expected}",
            self.rule.kind(),
            self.rule.name().unwrap_or_default()
        )
    }
}
