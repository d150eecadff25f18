//! Statement splitting and expression parsing
//!
//! The lexer already rejects malformed input (unterminated strings,
//! unbalanced brackets, stray characters). The parser never fails on top
//! of that: a statement it cannot model becomes a [`Stmt::Raw`].

use crate::error::Result;
use crate::lexer::{Token, TokenKind, tokenize};
use crate::syntax::{
    Arg, CallExpr, CommentBlock, DictEntry, DictExpr, Element, Expr, ListExpr, RawStmt, Rule,
    Stmt, StringExpr,
};

const KEYWORDS: &[&str] = &[
    "and", "break", "continue", "def", "elif", "else", "for", "if", "in", "lambda", "not", "or",
    "pass", "return",
];

/// Binary operator levels, loosest first, below comparisons
const BINARY_LEVELS: &[&[&str]] = &[
    &["|"],
    &["^"],
    &["&"],
    &["<<", ">>"],
    &["+", "-"],
    &["*", "/", "//", "%"],
];

const COMPARISONS: &[&str] = &["==", "!=", "<", ">", "<=", ">="];

/// Parse source text into top-level statements
pub(crate) fn parse_statements(path: &str, src: &str) -> Result<Vec<Stmt>> {
    let tokens = tokenize(path, src)?;
    Ok(Splitter {
        src,
        tokens: &tokens,
    }
    .split())
}

struct Splitter<'a> {
    src: &'a str,
    tokens: &'a [Token],
}

impl Splitter<'_> {
    fn split(&self) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        let mut pending: Vec<String> = Vec::new();
        let mut i = 0;

        loop {
            let token = &self.tokens[i];
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::Newline => {
                    let blank_line = i > 0 && self.tokens[i - 1].kind == TokenKind::Newline;
                    if blank_line && !pending.is_empty() {
                        stmts.push(Stmt::Comment(CommentBlock {
                            lines: std::mem::take(&mut pending),
                        }));
                    }
                    i += 1;
                }
                TokenKind::Comment => {
                    pending.push(token.text.clone());
                    i += 1;
                }
                _ => {
                    let (stmt, next) = self.statement(i, std::mem::take(&mut pending));
                    stmts.push(stmt);
                    i = next;
                }
            }
        }

        if !pending.is_empty() {
            stmts.push(Stmt::Comment(CommentBlock { lines: pending }));
        }
        stmts
    }

    /// Index of the `Newline`/`Eof` token ending the line that contains `i`
    fn line_end(&self, mut i: usize) -> usize {
        while !matches!(self.tokens[i].kind, TokenKind::Newline | TokenKind::Eof) {
            i += 1;
        }
        i
    }

    /// Parse the statement starting at token `start`. Returns the statement
    /// and the index of the token that terminates it.
    fn statement(&self, start: usize, comments: Vec<String>) -> (Stmt, usize) {
        let mut end = self.line_end(start);
        let mut last = end - 1;

        let header_end = if self.tokens[last].kind == TokenKind::Comment && last > start {
            last - 1
        } else {
            last
        };
        let is_block = self.tokens[header_end].is_op(":");
        if is_block {
            // Swallow the indented body of `def`/`if`/`for` blocks
            loop {
                let mut next = end;
                while matches!(
                    self.tokens[next].kind,
                    TokenKind::Newline | TokenKind::Comment
                ) {
                    next += 1;
                }
                let body = &self.tokens[next];
                if body.kind == TokenKind::Eof || body.col == 0 {
                    break;
                }
                end = self.line_end(next);
                last = end - 1;
            }
        }

        let text = self.src[self.tokens[start].start..self.tokens[last].end].to_string();

        if !is_block {
            let (significant, suffix) = if self.tokens[last].kind == TokenKind::Comment {
                (&self.tokens[start..last], Some(self.tokens[last].text.clone()))
            } else {
                (&self.tokens[start..=last], None)
            };

            match parse_call(significant) {
                Some(call) => {
                    return (
                        Stmt::Rule(Rule {
                            comments,
                            call,
                            suffix,
                        }),
                        end,
                    );
                }
                None if looks_like_call(significant) => {
                    tracing::warn!(
                        line = self.tokens[start].line,
                        "keeping call statement verbatim, its arguments could not be parsed"
                    );
                }
                None => {}
            }
        }

        (Stmt::Raw(RawStmt { comments, text }), end)
    }
}

fn looks_like_call(tokens: &[Token]) -> bool {
    matches!(tokens, [first, second, ..] if first.kind == TokenKind::Ident && second.is_op("("))
}

/// Parse a token slice that must be exactly one call on a dotted name
fn parse_call(tokens: &[Token]) -> Option<CallExpr> {
    let mut parser = ExprParser::new(tokens);
    let expr = parser.parse_expr().ok()?;
    if !parser.at_end() {
        return None;
    }
    match expr {
        Expr::Call(call) if call.func.dotted_name().is_some() => Some(call),
        _ => None,
    }
}

/// Marker for constructs the expression parser does not model
#[derive(Debug)]
struct Unsupported;

type PResult<T> = std::result::Result<T, Unsupported>;

/// One element of a bracketed sequence with its comments
type Commented<T> = (Vec<String>, T, Option<String>);

struct ExprParser<'t> {
    tokens: &'t [Token],
    pos: usize,
    /// Comments skipped while looking for the next significant token
    pending: Vec<&'t Token>,
    /// Line on which the last consumed token ended
    last_line: usize,
}

impl<'t> ExprParser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            pending: Vec::new(),
            last_line: 0,
        }
    }

    fn fill(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if token.kind != TokenKind::Comment {
                break;
            }
            self.pending.push(token);
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<&'t Token> {
        self.fill();
        self.tokens.get(self.pos)
    }

    /// The significant token after the next one
    fn peek_second(&self) -> Option<&'t Token> {
        self.tokens[self.pos..]
            .iter()
            .filter(|t| t.kind != TokenKind::Comment)
            .nth(1)
    }

    fn peek_op(&mut self, op: &str) -> bool {
        self.peek().is_some_and(|t| t.is_op(op))
    }

    fn peek_keyword(&mut self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    fn at_end(&mut self) -> bool {
        self.peek().is_none() && self.pending.is_empty()
    }

    /// Consume the next significant token. Fails if comments would be lost.
    fn bump(&mut self) -> PResult<&'t Token> {
        self.fill();
        if !self.pending.is_empty() {
            return Err(Unsupported);
        }
        let token = self.tokens.get(self.pos).ok_or(Unsupported)?;
        self.pos += 1;
        self.last_line = token.end_line;
        Ok(token)
    }

    fn expect_op(&mut self, op: &str) -> PResult<()> {
        if self.bump()?.is_op(op) {
            Ok(())
        } else {
            Err(Unsupported)
        }
    }

    fn take_leading(&mut self) -> Vec<String> {
        self.fill();
        self.pending.drain(..).map(|t| t.text.clone()).collect()
    }

    fn take_suffix(&mut self) -> Option<String> {
        self.fill();
        let on_same_line = self
            .pending
            .first()
            .is_some_and(|token| token.line == self.last_line);
        if on_same_line {
            Some(self.pending.remove(0).text.clone())
        } else {
            None
        }
    }

    fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_and()?;
        while self.peek_keyword("or") {
            self.bump()?;
            let rhs = self.parse_and()?;
            lhs = binary("or", lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_not()?;
        while self.peek_keyword("and") {
            self.bump()?;
            let rhs = self.parse_not()?;
            lhs = binary("and", lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_not(&mut self) -> PResult<Expr> {
        if self.peek_keyword("not") {
            self.bump()?;
            let x = self.parse_not()?;
            return Ok(Expr::Unary {
                op: "not".into(),
                x: Box::new(x),
            });
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_binary(0)?;
        loop {
            let op = match self.peek() {
                Some(t) if t.kind == TokenKind::Op && COMPARISONS.contains(&t.text.as_str()) => {
                    self.bump()?;
                    t.text.clone()
                }
                Some(t) if t.is_keyword("in") => {
                    self.bump()?;
                    "in".to_string()
                }
                Some(t)
                    if t.is_keyword("not")
                        && self.peek_second().is_some_and(|n| n.is_keyword("in")) =>
                {
                    self.bump()?;
                    self.bump()?;
                    "not in".to_string()
                }
                _ => break,
            };
            let rhs = self.parse_binary(0)?;
            lhs = binary(&op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_binary(&mut self, level: usize) -> PResult<Expr> {
        let Some(ops) = BINARY_LEVELS.get(level) else {
            return self.parse_unary();
        };
        let mut lhs = self.parse_binary(level + 1)?;
        loop {
            let op = match self.peek() {
                Some(t) if t.kind == TokenKind::Op && ops.contains(&t.text.as_str()) => {
                    t.text.clone()
                }
                _ => break,
            };
            self.bump()?;
            let rhs = self.parse_binary(level + 1)?;
            lhs = binary(&op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> PResult<Expr> {
        let op = match self.peek() {
            Some(t) if t.kind == TokenKind::Op && matches!(t.text.as_str(), "-" | "+" | "~") => {
                t.text.clone()
            }
            _ => return self.parse_postfix(),
        };
        self.bump()?;
        let x = self.parse_unary()?;
        Ok(Expr::Unary { op, x: Box::new(x) })
    }

    fn parse_postfix(&mut self) -> PResult<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.peek_op("(") {
                expr = Expr::Call(self.parse_call_args(expr)?);
            } else if self.peek_op("[") {
                self.bump()?;
                let index = self.parse_expr()?;
                self.expect_op("]")?;
                expr = Expr::Index {
                    x: Box::new(expr),
                    index: Box::new(index),
                };
            } else if self.peek_op(".") {
                self.bump()?;
                let name = self.bump()?;
                if name.kind != TokenKind::Ident || KEYWORDS.contains(&name.text.as_str()) {
                    return Err(Unsupported);
                }
                expr = Expr::Dot {
                    x: Box::new(expr),
                    name: name.text.clone(),
                };
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        let token = self.peek().ok_or(Unsupported)?;
        match token.kind {
            TokenKind::Ident if KEYWORDS.contains(&token.text.as_str()) => Err(Unsupported),
            TokenKind::Ident => {
                self.bump()?;
                Ok(Expr::Ident(token.text.clone()))
            }
            TokenKind::Number => {
                self.bump()?;
                Ok(Expr::Number(token.text.clone()))
            }
            TokenKind::String => {
                self.bump()?;
                if self.peek().is_some_and(|t| t.kind == TokenKind::String) {
                    // Implicit concatenation
                    return Err(Unsupported);
                }
                Ok(Expr::String(StringExpr::parsed(
                    token.value.clone(),
                    token.text.clone(),
                )))
            }
            TokenKind::Op if token.text == "[" => self.parse_list(),
            TokenKind::Op if token.text == "{" => self.parse_dict(),
            TokenKind::Op if token.text == "(" => self.parse_paren(),
            _ => Err(Unsupported),
        }
    }

    /// Parse `item, item, ...close` after the opening bracket was consumed
    fn parse_sequence<T>(
        &mut self,
        close: &str,
        mut item: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<(Vec<Commented<T>>, Vec<String>)> {
        let mut items = Vec::new();
        loop {
            let comments = self.take_leading();
            if self.peek_op(close) {
                self.bump()?;
                return Ok((items, comments));
            }

            let value = item(self)?;
            let mut suffix = self.take_suffix();
            let has_comma = self.peek_op(",");
            if has_comma {
                self.bump()?;
                if suffix.is_none() {
                    suffix = self.take_suffix();
                }
            }
            items.push((comments, value, suffix));

            if !has_comma {
                let trailing = self.take_leading();
                self.expect_op(close)?;
                return Ok((items, trailing));
            }
        }
    }

    fn parse_list(&mut self) -> PResult<Expr> {
        self.expect_op("[")?;
        let (items, trailing) = self.parse_sequence("]", |p| p.parse_expr())?;
        Ok(Expr::List(ListExpr {
            items: items
                .into_iter()
                .map(|(comments, value, suffix)| Element {
                    comments,
                    value,
                    suffix,
                })
                .collect(),
            trailing,
        }))
    }

    fn parse_dict(&mut self) -> PResult<Expr> {
        self.expect_op("{")?;
        let (entries, trailing) = self.parse_sequence("}", |p| {
            let key = p.parse_expr()?;
            p.expect_op(":")?;
            let value = p.parse_expr()?;
            Ok((key, value))
        })?;
        Ok(Expr::Dict(DictExpr {
            entries: entries
                .into_iter()
                .map(|(comments, (key, value), suffix)| DictEntry {
                    comments,
                    key,
                    value,
                    suffix,
                })
                .collect(),
            trailing,
        }))
    }

    fn parse_paren(&mut self) -> PResult<Expr> {
        self.expect_op("(")?;
        if self.peek_op(")") {
            self.bump()?;
            return Ok(Expr::Tuple(Vec::new()));
        }

        let first = self.parse_expr()?;
        if self.peek_op(")") {
            self.bump()?;
            return Ok(Expr::Paren(Box::new(first)));
        }

        let mut items = vec![first];
        loop {
            self.expect_op(",")?;
            if self.peek_op(")") {
                self.bump()?;
                break;
            }
            items.push(self.parse_expr()?);
            if self.peek_op(")") {
                self.bump()?;
                break;
            }
        }
        Ok(Expr::Tuple(items))
    }

    fn parse_call_args(&mut self, func: Expr) -> PResult<CallExpr> {
        self.expect_op("(")?;
        let (args, trailing) = self.parse_sequence(")", |p| {
            let is_keyword = p.peek().is_some_and(|t| t.kind == TokenKind::Ident)
                && p.peek_second().is_some_and(|t| t.is_op("="));
            let name = if is_keyword {
                let name = p.bump()?.text.clone();
                p.expect_op("=")?;
                Some(name)
            } else {
                None
            };
            if p.peek_op("*") || p.peek_op("**") {
                return Err(Unsupported);
            }
            Ok((name, p.parse_expr()?))
        })?;

        Ok(CallExpr {
            func: Box::new(func),
            args: args
                .into_iter()
                .map(|(comments, (name, value), suffix)| Arg {
                    comments,
                    name,
                    value,
                    suffix,
                })
                .collect(),
            trailing,
        })
    }
}

fn binary(op: &str, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op: op.to_string(),
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}
