//! Syntax tree for BUILD and WORKSPACE files
//!
//! Only top-level calls are modelled in full. Everything else is kept as
//! verbatim source text so that unknown constructs survive a rewrite.

/// A top-level statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// A block of comment lines separated from its neighbours by blank lines
    Comment(CommentBlock),
    /// A call such as `rpm(name = "...")`
    Rule(Rule),
    /// Any other statement, kept as written
    Raw(RawStmt),
}

impl Stmt {
    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            Self::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_rule_mut(&mut self) -> Option<&mut Rule> {
        match self {
            Self::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentBlock {
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStmt {
    /// Comment lines directly above the statement
    pub comments: Vec<String>,
    pub text: String,
}

/// A top-level call statement.
///
/// The kind is the callee (`rpm`, `native.http_archive`), the attributes
/// are its keyword arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Comment lines directly above the rule
    pub comments: Vec<String>,
    pub call: CallExpr,
    /// Comment on the same line as the closing parenthesis
    pub suffix: Option<String>,
}

impl Rule {
    /// Create an empty rule of the given kind. Dotted kinds are split into
    /// attribute accesses.
    pub fn new(kind: &str) -> Self {
        let mut parts = kind.split('.');
        let mut func = Expr::Ident(parts.next().unwrap_or_default().to_string());
        for part in parts {
            func = Expr::Dot {
                x: Box::new(func),
                name: part.to_string(),
            };
        }

        Self {
            comments: Vec::new(),
            call: CallExpr {
                func: Box::new(func),
                args: Vec::new(),
                trailing: Vec::new(),
            },
            suffix: None,
        }
    }

    /// The callee spelled as a dotted name, or an empty string when the
    /// callee is not a plain name.
    pub fn kind(&self) -> String {
        self.call.func.dotted_name().unwrap_or_default()
    }

    /// The value of the `name` attribute when it is a string
    pub fn name(&self) -> Option<&str> {
        self.attr("name").and_then(Expr::as_str)
    }

    pub fn attr(&self, key: &str) -> Option<&Expr> {
        self.call
            .args
            .iter()
            .find(|arg| arg.name.as_deref() == Some(key))
            .map(|arg| &arg.value)
    }

    pub fn attr_mut(&mut self, key: &str) -> Option<&mut Expr> {
        self.call
            .args
            .iter_mut()
            .find(|arg| arg.name.as_deref() == Some(key))
            .map(|arg| &mut arg.value)
    }

    /// Replace the value of an attribute, keeping its comments, or append
    /// the attribute when it does not exist yet.
    pub fn set_attr(&mut self, key: &str, value: Expr) {
        match self.attr_mut(key) {
            Some(existing) => *existing = value,
            None => self.call.args.push(Arg::keyword(key, value)),
        }
    }

    /// Names of all keyword arguments in order
    pub fn attr_keys(&self) -> impl Iterator<Item = &str> {
        self.call.args.iter().filter_map(|arg| arg.name.as_deref())
    }
}

/// An expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    Number(String),
    String(StringExpr),
    List(ListExpr),
    Dict(DictExpr),
    Tuple(Vec<Expr>),
    Paren(Box<Expr>),
    Call(CallExpr),
    Dot { x: Box<Expr>, name: String },
    Index { x: Box<Expr>, index: Box<Expr> },
    Unary { op: String, x: Box<Expr> },
    Binary { op: String, lhs: Box<Expr>, rhs: Box<Expr> },
}

impl Expr {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(StringExpr::new(value))
    }

    /// A list literal of strings in the given order
    pub fn string_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(ListExpr {
            items: items
                .into_iter()
                .map(|item| Element::new(Self::string(item)))
                .collect(),
            trailing: Vec::new(),
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(&s.value),
            _ => None,
        }
    }

    /// The items of a list literal whose elements are all strings
    pub fn as_string_list(&self) -> Option<Vec<String>> {
        match self {
            Self::List(list) => list
                .items
                .iter()
                .map(|item| item.value.as_str().map(str::to_string))
                .collect(),
            _ => None,
        }
    }

    /// `a.b.c` for identifier chains, `None` for anything else
    pub fn dotted_name(&self) -> Option<String> {
        match self {
            Self::Ident(name) => Some(name.clone()),
            Self::Dot { x, name } => x.dotted_name().map(|prefix| format!("{prefix}.{name}")),
            _ => None,
        }
    }
}

/// A string literal.
///
/// Equality compares values only; the original spelling is kept so
/// parsed strings print exactly as they were written.
#[derive(Debug, Clone, Eq)]
pub struct StringExpr {
    pub value: String,
    pub(crate) raw: Option<String>,
}

impl StringExpr {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            raw: None,
        }
    }

    pub(crate) fn parsed(value: String, raw: String) -> Self {
        Self {
            value,
            raw: Some(raw),
        }
    }

    /// The spelling as it appeared in the source, if parsed
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl PartialEq for StringExpr {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListExpr {
    pub items: Vec<Element>,
    /// Comments after the last element
    pub trailing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub comments: Vec<String>,
    pub value: Expr,
    pub suffix: Option<String>,
}

impl Element {
    pub fn new(value: Expr) -> Self {
        Self {
            comments: Vec::new(),
            value,
            suffix: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictExpr {
    pub entries: Vec<DictEntry>,
    pub trailing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictEntry {
    pub comments: Vec<String>,
    pub key: Expr,
    pub value: Expr,
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    pub func: Box<Expr>,
    pub args: Vec<Arg>,
    pub trailing: Vec<String>,
}

/// A positional (`name` is `None`) or keyword argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub comments: Vec<String>,
    pub name: Option<String>,
    pub value: Expr,
    pub suffix: Option<String>,
}

impl Arg {
    pub fn keyword(name: impl Into<String>, value: Expr) -> Self {
        Self {
            comments: Vec::new(),
            name: Some(name.into()),
            value,
            suffix: None,
        }
    }

    pub fn positional(value: Expr) -> Self {
        Self {
            comments: Vec::new(),
            name: None,
            value,
            suffix: None,
        }
    }
}
